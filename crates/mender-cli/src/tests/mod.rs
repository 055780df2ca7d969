//! Unit and behaviour tests for the CLI runtime.

mod behaviour;
mod support;

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use mender_harness::{AttemptOutcome, EditAttempt, EditCandidate};
use rstest::rstest;

use self::support::{StaticConfigLoader, TestWorld, world};
use crate::{IoStreams, run_with_loader};
use crate::config::split_config_arguments;
use crate::prepare_cli_arguments;
use crate::transcript::attempt_line;

fn os(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

#[test]
fn configuration_flags_are_removed_before_clap_parses() {
    let args = os(&["mender", "--build-command", "make", "check-guards", "--strict"]);
    let split = split_config_arguments(&args);
    assert_eq!(
        prepare_cli_arguments(&args, &split),
        os(&["mender", "check-guards", "--strict"])
    );
}

#[rstest]
#[case(
    EditCandidate::replace("a.cpp", 2, "  Widget w;", "  const Widget w;"),
    AttemptOutcome::Committed,
    "Success: a.cpp:3: Widget w; -> const Widget w;"
)]
#[case(
    EditCandidate::remove("a.cpp", 0, "#include <map>"),
    AttemptOutcome::Reverted,
    "Failed: a.cpp:1: #include <map> -> (removed)"
)]
fn formats_transcript_lines(
    #[case] candidate: EditCandidate,
    #[case] outcome: AttemptOutcome,
    #[case] expected: &str,
) {
    let attempt = EditAttempt::new(&candidate, outcome);
    assert_eq!(attempt_line(Path::new("a.cpp"), &attempt), expected);
}

#[rstest]
fn help_goes_to_stdout_and_succeeds(mut world: TestWorld) {
    world.run("--help");
    assert_eq!(world.exit_code(), ExitCode::SUCCESS);
    assert!(world.stdout_text().contains("constify"));
    assert!(world.stderr_text().is_empty());
}

/// A stream that rejects every write.
struct ClosedStream;

impl io::Write for ClosedStream {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[rstest]
fn help_fails_when_stdout_is_closed(world: TestWorld) {
    let loader = StaticConfigLoader::new(world.config.clone());
    let mut stdout = ClosedStream;
    let mut stderr = Vec::new();
    let mut io = IoStreams::new(&mut stdout, &mut stderr);

    let exit_code = run_with_loader(TestWorld::build_args("--help"), &mut io, &loader);

    assert_eq!(exit_code, ExitCode::FAILURE);
    let report = String::from_utf8(stderr).expect("stderr utf8");
    assert!(report.contains("pipe"), "unexpected report: {report}");
}

#[test]
fn error_reports_survive_a_closed_stderr() {
    let mut stdout = Vec::new();
    let mut stderr = ClosedStream;
    let mut io = IoStreams::new(&mut stdout, &mut stderr);
    let loader = StaticConfigLoader::new(mender_config::Config::default());

    let exit_code = run_with_loader(os(&["mender", "polish"]), &mut io, &loader);

    assert_eq!(exit_code, ExitCode::FAILURE);
    assert!(stdout.is_empty());
}

#[rstest]
fn unknown_subcommands_fail(mut world: TestWorld) {
    world.run("polish");
    assert_eq!(world.exit_code(), ExitCode::FAILURE);
    assert!(world.stderr_text().contains("polish"));
}

#[rstest]
fn invalid_build_commands_are_reported(mut world: TestWorld) {
    world.config.build_command = String::from("make \"unterminated");
    world.write("editor/main.cpp", "int main();\n");
    world.run("prune-includes");
    assert_eq!(world.exit_code(), ExitCode::FAILURE);
    assert!(world.stderr_text().contains("invalid build command"));
}

#[rstest]
fn explicit_files_bypass_the_walk(mut world: TestWorld) {
    world.write("editor/Guarded.h", "#pragma once\n");
    let loose = world.write("loose/Open.h", "class Open;\n");
    world.run(&format!("check-guards {}", loose.display()));
    let stdout = world.stdout_text();
    assert!(stdout.contains("Open.h: missing include guards"), "{stdout}");
    assert!(stdout.ends_with("1 warning(s)\n"), "{stdout}");
}

#[rstest]
fn missing_roots_are_skipped_by_checkers(mut world: TestWorld) {
    world.config.roots = vec![String::from("editor"), String::from("absent")];
    world.write("editor/Widget.h", "#pragma once\n");
    world.run("check-guards --strict");
    assert_eq!(world.exit_code(), ExitCode::SUCCESS);
    assert_eq!(world.stdout_text(), "0 warning(s)\n");
}

#[cfg(unix)]
mod rewrite {
    use super::*;

    #[rstest]
    fn constify_prints_a_line_per_attempt(mut world: TestWorld) {
        world.write("editor/Widget.h", "#pragma once\nclass Widget;\n");
        world.write("editor/main.cpp", "Widget w = f();\nint n = 0;\n");
        world.run("constify");

        assert_eq!(world.exit_code(), ExitCode::SUCCESS, "{}", world.stderr_text());
        let stdout = world.stdout_text();
        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(lines.len(), 2, "{stdout}");
        assert!(lines[0].starts_with("Success: "));
        assert!(lines[0].ends_with("main.cpp:1: Widget w = f(); -> const Widget w = f();"));
        assert_eq!(lines[1], "1 edit(s) committed, 0 reverted, 1 file(s) changed");
        assert_eq!(world.read("editor/main.cpp"), "const Widget w = f();\nint n = 0;\n");
    }

    #[rstest]
    fn constify_leaves_headers_alone(mut world: TestWorld) {
        world.write("editor/Widget.h", "#pragma once\nclass Widget;\nWidget shared;\n");
        world.run("constify");
        assert_eq!(world.exit_code(), ExitCode::SUCCESS);
        assert_eq!(world.stdout_text(), "0 edit(s) committed, 0 reverted, 0 file(s) changed\n");
    }

    #[rstest]
    fn build_output_is_written_to_the_log(mut world: TestWorld) {
        world.config.build_command = String::from("echo building");
        world.config.build_log = Some("build.log".into());
        world.write("editor/main.cpp", "#include <map>\n");
        world.run("prune-includes");

        assert_eq!(world.exit_code(), ExitCode::SUCCESS, "{}", world.stderr_text());
        assert_eq!(world.read("build.log"), "building\nbuilding\n");
        assert_eq!(world.read("editor/main.cpp"), "");
    }

    #[rstest]
    fn missing_roots_abort_rewrites(mut world: TestWorld) {
        world.config.roots = vec![String::from("absent")];
        world.run("prune-includes");
        assert_eq!(world.exit_code(), ExitCode::FAILURE);
        assert!(world.stderr_text().contains("absent"));
    }
}
