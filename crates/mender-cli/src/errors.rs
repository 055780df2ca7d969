//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use mender_checks::CheckError;
use mender_config::BuildCommandError;
use mender_harness::HarnessError;
use mender_scan::ScanError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("invalid build command: {0}")]
    BuildCommand(#[from] BuildCommandError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Harness(#[from] HarnessError),
    #[error(transparent)]
    Check(#[from] CheckError),
    #[error("failed to write transcript: {0}")]
    Transcript(#[source] io::Error),
}
