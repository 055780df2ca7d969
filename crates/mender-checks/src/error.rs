//! Error types for checker and normaliser runs.

use mender_scan::ScanError;
use thiserror::Error;

/// Errors that stop a checker run. Findings are warnings, not errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CheckError {
    /// Walking, reading or writing a file failed.
    #[error(transparent)]
    Source(#[from] ScanError),
}
