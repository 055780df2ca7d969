//! Command-line runtime for the mender maintenance passes.
//!
//! The module owns argument parsing, configuration bootstrapping, telemetry
//! and the stdout transcript. It can be driven from the binary entrypoint or
//! from tests, where the configuration loader and IO streams are substituted.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod config;
mod errors;
mod telemetry;
mod transcript;

use cli::Cli;
use config::{ConfigArgumentSplit, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;

const CLI_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::cli");

/// CLI flags recognised by the configuration loader.
///
/// MAINTENANCE: keep in sync with the fields of `mender_config::Config`.
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--base-dir",
    "--roots",
    "--header-extensions",
    "--source-extensions",
    "--build-command",
    "--build-dir",
    "--build-log",
    "--license-marker",
];

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) const fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self { stdout, stderr }
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
#[must_use]
pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&args);
    let cli_arguments = prepare_cli_arguments(&args, &split);

    let result = Cli::try_parse_from(cli_arguments)
        .map_err(AppError::CliUsage)
        .and_then(|cli| {
            loader
                .load(&split.config_arguments)
                .map(|config| (cli, config))
        })
        .and_then(|(cli, config)| {
            telemetry::initialise(&config)?;
            commands::execute(&cli.command, &config, &mut *io.stdout)
        });

    match result {
        Ok(exit_code) => exit_code,
        Err(AppError::CliUsage(error)) if !error.use_stderr() => {
            match write!(io.stdout, "{error}") {
                Ok(()) => ExitCode::SUCCESS,
                Err(write_error) => report_failure(&mut *io.stderr, &write_error),
            }
        }
        Err(error) => report_failure(&mut *io.stderr, &error),
    }
}

/// Writes `error` to stderr and returns the failure exit code. A failed
/// stderr write is logged, since no stream is left to report it on.
fn report_failure(stderr: &mut impl Write, error: &dyn std::fmt::Display) -> ExitCode {
    if let Err(write_error) = writeln!(stderr, "{error}") {
        tracing::error!(target: CLI_TARGET, %error, %write_error, "failed to write error report");
    }
    ExitCode::FAILURE
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    let mut cli_arguments: Vec<OsString> = Vec::new();
    if let Some(first) = args.first() {
        cli_arguments.push(first.clone());
    }
    cli_arguments.extend(args.iter().skip(split.command_start).cloned());
    cli_arguments
}

#[cfg(test)]
mod tests;
