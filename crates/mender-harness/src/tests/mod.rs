//! End-to-end tests for the compile-gated rewriter.

mod behaviour;
mod support;

use std::cell::RefCell;
use std::fs;

use mockall::mock;
use rstest::rstest;

use self::support::{RecordingListener, Tree, tree};
use crate::{
    AttemptOutcome, BuildOracle, BuildVerdict, ClosureOracle, ConstifyRule, HarnessError,
    IncludePruneRule, Rewriter, ScriptedOracle, SilentListener,
};

mock! {
    Oracle {}
    impl BuildOracle for Oracle {
        fn verify(&self) -> Result<BuildVerdict, HarnessError>;
    }
}

#[rstest]
fn unmutated_declaration_is_made_const(tree: Tree) {
    let source = tree.source("editor/main.cpp", "Widget w = f();\n");
    let index = tree.index();
    let rule = ConstifyRule::new(&index);
    let oracle = ScriptedOracle::passing();
    let mut listener = RecordingListener::default();

    let report = Rewriter::new(&rule, &oracle)
        .run([&source], &mut listener)
        .expect("run succeeds");

    assert_eq!(tree.read(&source), "const Widget w = f();\n");
    assert_eq!(report.committed(), 1);
    assert_eq!(report.reverted(), 0);
    assert_eq!(oracle.calls(), 2);
    assert_eq!(listener.outcomes, [AttemptOutcome::Committed]);
}

#[rstest]
fn mutated_declaration_is_reverted(tree: Tree) {
    let original = "Widget w = f();\nw.mutate();\n";
    let source = tree.source("editor/main.cpp", original);
    let index = tree.index();
    let rule = ConstifyRule::new(&index);
    let oracle = ClosureOracle::new(|| {
        let content = fs::read_to_string(&source).unwrap_or_default();
        BuildVerdict::from(!content.contains("const Widget w"))
    });

    let report = Rewriter::new(&rule, &oracle)
        .run([&source], &mut SilentListener)
        .expect("run succeeds");

    assert_eq!(tree.read(&source), original);
    assert_eq!(report.committed(), 0);
    assert_eq!(report.reverted(), 1);
}

#[rstest]
fn scanning_continues_after_a_revert(tree: Tree) {
    let source = tree.source(
        "editor/main.cpp",
        "Widget w = f();\nw.mutate();\nWidget v = g();\n",
    );
    let index = tree.index();
    let rule = ConstifyRule::new(&index);
    let oracle = ClosureOracle::new(|| {
        let content = fs::read_to_string(&source).unwrap_or_default();
        BuildVerdict::from(!content.contains("const Widget w"))
    });

    let report = Rewriter::new(&rule, &oracle)
        .run([&source], &mut SilentListener)
        .expect("run succeeds");

    assert_eq!(
        tree.read(&source),
        "Widget w = f();\nw.mutate();\nconst Widget v = g();\n"
    );
    // A commit restarts the scan, so the rejected line is tried once more.
    let lines: Vec<_> = report.files()[0]
        .attempts()
        .iter()
        .map(|attempt| (attempt.line(), attempt.outcome()))
        .collect();
    assert_eq!(
        lines,
        [
            (0, AttemptOutcome::Reverted),
            (2, AttemptOutcome::Committed),
            (0, AttemptOutcome::Reverted),
        ]
    );
}

#[rstest]
fn failing_baseline_aborts_before_any_edit(tree: Tree) {
    let original = "Widget w = f();\n";
    let source = tree.source("editor/main.cpp", original);
    let index = tree.index();
    let rule = ConstifyRule::new(&index);
    let mut oracle = MockOracle::new();
    oracle
        .expect_verify()
        .times(1)
        .returning(|| Ok(BuildVerdict::Fail));

    let error = Rewriter::new(&rule, &oracle)
        .run([&source], &mut SilentListener)
        .expect_err("baseline fails");

    assert!(matches!(error, HarnessError::PreconditionFailed));
    assert_eq!(tree.read(&source), original);
}

#[rstest]
fn unavailable_oracle_reverts_then_aborts(tree: Tree) {
    let original = "Widget w = f();\n";
    let source = tree.source("editor/main.cpp", original);
    let index = tree.index();
    let rule = ConstifyRule::new(&index);
    let oracle = ScriptedOracle::new([BuildVerdict::Pass]).unavailable_after_script();

    let error = Rewriter::new(&rule, &oracle)
        .run([&source], &mut SilentListener)
        .expect_err("oracle goes away");

    assert!(matches!(error, HarnessError::OracleUnavailable { .. }));
    assert_eq!(tree.read(&source), original);
}

#[rstest]
fn files_without_candidates_are_untouched(tree: Tree) {
    let quiet = tree.source("editor/quiet.cpp", "int x = 0;\n");
    let busy = tree.source("editor/busy.cpp", "Widget w;\n");
    let before = fs::metadata(&quiet).and_then(|meta| meta.modified()).ok();
    let index = tree.index();
    let rule = ConstifyRule::new(&index);
    let oracle = ScriptedOracle::passing();

    let report = Rewriter::new(&rule, &oracle)
        .run([&quiet, &busy], &mut SilentListener)
        .expect("run succeeds");

    assert_eq!(tree.read(&quiet), "int x = 0;\n");
    assert_eq!(fs::metadata(&quiet).and_then(|meta| meta.modified()).ok(), before);
    assert_eq!(report.changed_files(), 1);
}

#[rstest]
fn committed_edits_were_verified_on_disk(tree: Tree) {
    let source = tree.source("editor/main.cpp", "Widget a;\nWidget b;\n");
    let index = tree.index();
    let rule = ConstifyRule::new(&index);
    let seen = RefCell::new(Vec::new());
    let oracle = ClosureOracle::new(|| {
        seen.borrow_mut()
            .push(fs::read_to_string(&source).unwrap_or_default());
        BuildVerdict::Pass
    });

    Rewriter::new(&rule, &oracle)
        .run([&source], &mut SilentListener)
        .expect("run succeeds");

    assert_eq!(
        seen.into_inner(),
        [
            "Widget a;\nWidget b;\n",
            "const Widget a;\nWidget b;\n",
            "const Widget a;\nconst Widget b;\n",
        ]
    );
}

#[rstest]
fn reverts_restore_exact_bytes(tree: Tree) {
    let original = "\tWidget w = f();  \r\nw.mutate();\r\n";
    let source = tree.source("editor/main.cpp", original);
    let index = tree.index();
    let rule = ConstifyRule::new(&index);
    let oracle = ScriptedOracle::new([BuildVerdict::Pass]).with_fallback(BuildVerdict::Fail);

    Rewriter::new(&rule, &oracle)
        .run([&source], &mut SilentListener)
        .expect("run succeeds");

    assert_eq!(tree.read(&source), original);
}

#[rstest]
fn includes_are_pruned_only_when_the_build_allows(tree: Tree) {
    let source = tree.source(
        "editor/main.cpp",
        "#include <vector>\n#include <map>\n#include <set> // keep\nint x;\n",
    );
    let oracle = ClosureOracle::new(|| {
        let content = fs::read_to_string(&source).unwrap_or_default();
        BuildVerdict::from(content.contains("<map>"))
    });

    let report = Rewriter::new(&IncludePruneRule::new(), &oracle)
        .run([&source], &mut SilentListener)
        .expect("run succeeds");

    assert_eq!(
        tree.read(&source),
        "#include <map>\n#include <set> // keep\nint x;\n"
    );
    assert_eq!(report.committed(), 1);
    assert_eq!(report.reverted(), 1);
}
