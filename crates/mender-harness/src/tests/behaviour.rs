//! Behaviour-driven tests for the compile-gated rewriter.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use mender_scan::{LexicalScanner, SymbolIndex, TreeWalker};

use crate::{
    BuildVerdict, ClosureOracle, ConstifyRule, HarnessError, Rewriter, RunReport, SilentListener,
};

/// A quoted string value from a Gherkin feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QuotedString(String);

impl FromStr for QuotedString {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim_matches('"').to_owned()))
    }
}

#[derive(Debug, Clone, Default)]
enum BuildMode {
    #[default]
    Passing,
    Failing,
    Rejecting(String),
}

struct TestWorld {
    tree: TempDir,
    source: PathBuf,
    build: BuildMode,
    result: Option<Result<RunReport, HarnessError>>,
}

impl TestWorld {
    fn report(&self) -> &RunReport {
        self.result
            .as_ref()
            .expect("pass should have run")
            .as_ref()
            .expect("pass should succeed")
    }
}

#[fixture]
fn world() -> TestWorld {
    let tree = TempDir::new().expect("temp dir");
    let source = tree.path().join("editor/main.cpp");
    TestWorld {
        tree,
        source,
        build: BuildMode::default(),
        result: None,
    }
}

fn write(path: &std::path::Path, content: &str) {
    fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    fs::write(path, format!("{content}\n")).expect("write file");
}

#[given("a header declaring {declaration}")]
fn given_header(world: &mut TestWorld, declaration: QuotedString) {
    write(&world.tree.path().join("editor/Widget.h"), &declaration.0);
}

#[given("a source file containing {content}")]
fn given_source(world: &mut TestWorld, content: QuotedString) {
    write(&world.source, &content.0);
}

#[given("a build that always passes")]
fn given_passing_build(world: &mut TestWorld) {
    world.build = BuildMode::Passing;
}

#[given("a build that always fails")]
fn given_failing_build(world: &mut TestWorld) {
    world.build = BuildMode::Failing;
}

#[given("a build that rejects {text}")]
fn given_rejecting_build(world: &mut TestWorld, text: QuotedString) {
    world.build = BuildMode::Rejecting(text.0);
}

#[when("the constify pass runs")]
fn when_constify_runs(world: &mut TestWorld) {
    let walker = TreeWalker::new(world.tree.path())
        .with_roots(["editor"])
        .with_extensions(["h"]);
    let index =
        SymbolIndex::build(walker.walk(), &LexicalScanner::new()).expect("index builds");
    let rule = ConstifyRule::new(&index);
    let source = world.source.clone();
    let build = world.build.clone();
    let oracle = ClosureOracle::new(move || match &build {
        BuildMode::Passing => BuildVerdict::Pass,
        BuildMode::Failing => BuildVerdict::Fail,
        BuildMode::Rejecting(text) => {
            let content = fs::read_to_string(&source).unwrap_or_default();
            BuildVerdict::from(!content.contains(text.as_str()))
        }
    });

    world.result = Some(Rewriter::new(&rule, &oracle).run([&world.source], &mut SilentListener));
}

#[then("the source file reads {content}")]
fn then_source_reads(world: &mut TestWorld, content: QuotedString) {
    let actual = fs::read_to_string(&world.source).expect("read source");
    assert_eq!(actual, format!("{}\n", content.0));
}

#[then("{count} edit was committed")]
fn then_one_committed(world: &mut TestWorld, count: usize) {
    assert_eq!(world.report().committed(), count);
}

#[then("{count} edits were committed")]
fn then_committed(world: &mut TestWorld, count: usize) {
    assert_eq!(world.report().committed(), count);
}

#[then("{count} edit was reverted")]
fn then_one_reverted(world: &mut TestWorld, count: usize) {
    assert_eq!(world.report().reverted(), count);
}

#[then("{count} edits were reverted")]
fn then_reverted(world: &mut TestWorld, count: usize) {
    assert_eq!(world.report().reverted(), count);
}

#[then("the run fails with a precondition failure")]
fn then_precondition_failure(world: &mut TestWorld) {
    let result = world.result.as_ref().expect("pass should have run");
    assert!(matches!(result, Err(HarnessError::PreconditionFailed)));
}

#[scenario(path = "tests/features/rewriter.feature")]
fn rewriter_behaviour(world: TestWorld) {
    let _ = world;
}
