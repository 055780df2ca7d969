//! CLI argument definitions for the `mender` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Compile-gated maintenance passes for the engine tree.
///
/// Configuration flags (`--base-dir`, `--build-command`, ...) come before the
/// subcommand.
#[derive(Parser, Debug)]
#[command(name = "mender", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// The pass to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Maintenance passes.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Adds `const` to declarations of indexed types, keeping each edit only
    /// when the build still passes.
    Constify(FileArgs),
    /// Removes `#include` lines, keeping each removal only when the build
    /// still passes.
    PruneIncludes(FileArgs),
    /// Reports headers without include guards.
    CheckGuards(CheckArgs),
    /// Reports files without the license header.
    CheckLicense(CheckArgs),
    /// Reports includes that resolve to no known project or file.
    CheckIncludes(CheckArgs),
    /// Expands leading tabs, strips trailing blanks and ensures a final newline.
    Normalize(FileArgs),
}

/// Files to process instead of walking the project roots.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct FileArgs {
    /// Explicit files; every matching file under the roots when omitted.
    #[arg(value_name = "FILE")]
    pub(crate) files: Vec<PathBuf>,
}

/// Options shared by the checkers.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct CheckArgs {
    /// Exits with failure when any warning is reported.
    #[arg(long)]
    pub(crate) strict: bool,
    #[command(flatten)]
    pub(crate) files: FileArgs,
}
