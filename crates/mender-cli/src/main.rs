//! CLI entrypoint for the mender maintenance passes.
//!
//! The binary delegates to [`mender_cli::run`], which loads configuration,
//! parses the subcommand and writes the transcript to stdout.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    mender_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
