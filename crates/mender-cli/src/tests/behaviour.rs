//! BDD step definitions for the `mender` command line.
//!
//! Scenarios live in `tests/features/mender_cli.feature` and run the CLI
//! in-process against a scratch tree.

use std::process::ExitCode;
use std::str::FromStr;

use rstest_bdd_macros::{given, scenario, then, when};

use super::support::{TestWorld, world};

/// A quoted string value from a Gherkin feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QuotedString(String);

impl FromStr for QuotedString {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim_matches('"');
        Ok(Self(text.replace("\\n", "\n").replace("\\t", "\t")))
    }
}

#[given("a file {path} containing {content}")]
fn given_file(world: &mut TestWorld, path: QuotedString, content: QuotedString) {
    world.write(&path.0, &content.0);
}

#[given("the license marker {marker}")]
fn given_license_marker(world: &mut TestWorld, marker: QuotedString) {
    world.config.license_marker = marker.0;
}

#[when("the operator runs {command}")]
fn when_operator_runs(world: &mut TestWorld, command: QuotedString) {
    world.run(&command.0);
}

#[then("stdout contains {snippet}")]
fn then_stdout_contains(world: &mut TestWorld, snippet: QuotedString) {
    let stdout = world.stdout_text();
    assert!(
        stdout.contains(&snippet.0),
        "stdout {stdout:?} did not contain {:?}",
        snippet.0
    );
}

#[then("stdout ends with {snippet}")]
fn then_stdout_ends_with(world: &mut TestWorld, snippet: QuotedString) {
    let stdout = world.stdout_text();
    assert!(
        stdout.trim_end().ends_with(&snippet.0),
        "stdout {stdout:?} did not end with {:?}",
        snippet.0
    );
}

#[then("the file {path} reads {content}")]
fn then_file_reads(world: &mut TestWorld, path: QuotedString, content: QuotedString) {
    assert_eq!(world.read(&path.0), content.0);
}

#[then("the CLI succeeds")]
fn then_success(world: &mut TestWorld) {
    assert_eq!(world.exit_code(), ExitCode::SUCCESS, "{}", world.stderr_text());
}

#[then("the CLI fails")]
fn then_failure(world: &mut TestWorld) {
    assert_eq!(world.exit_code(), ExitCode::FAILURE);
}

#[scenario(path = "tests/features/mender_cli.feature")]
fn mender_cli_behaviour(world: TestWorld) {
    let _ = world;
}
