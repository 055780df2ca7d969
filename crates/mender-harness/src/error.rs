//! Error types for the compile-gated rewriter.
//!
//! A rejected edit is not an error: it is recorded as a reverted attempt and
//! the run continues. These variants cover the failures that stop a run.

use std::path::PathBuf;

use mender_scan::ScanError;
use thiserror::Error;

/// Errors that abort a rewrite run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HarnessError {
    /// The tree did not build before any edit was attempted.
    #[error("the baseline build fails; refusing to edit a tree that does not build")]
    PreconditionFailed,

    /// The build command could not be run at all.
    #[error("build oracle unavailable: failed to run {program}: {message}")]
    OracleUnavailable {
        /// Program that was spawned.
        program: String,
        /// Description of the spawn failure.
        message: String,
    },

    /// The build log could not be opened.
    #[error("failed to open build log {}: {message}", path.display())]
    BuildLog {
        /// Path to the log file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// A candidate no longer matches the content it was found in.
    #[error("edit application failed for {}:{line}: {message}", path.display())]
    EditApplication {
        /// Path to the affected file.
        path: PathBuf,
        /// Zero-based line of the candidate.
        line: usize,
        /// Description of what went wrong.
        message: String,
    },

    /// Reading or writing a source file failed.
    #[error(transparent)]
    Source(#[from] ScanError),
}

impl HarnessError {
    /// Creates a build log error.
    #[must_use]
    pub fn build_log(path: PathBuf, error: &std::io::Error) -> Self {
        Self::BuildLog {
            path,
            message: error.to_string(),
        }
    }
}
