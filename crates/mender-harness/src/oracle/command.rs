//! Build oracle backed by an external command.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

use mender_config::BuildCommand;
use tracing::debug;

use super::{BuildOracle, BuildVerdict};
use crate::error::HarnessError;

const ORACLE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::oracle");

/// Runs a build command and maps its exit status to a verdict.
///
/// Output goes to the build log when one is configured and is discarded
/// otherwise. The log is truncated once by [`CommandOracle::with_log`] and
/// appended to by every build after that.
#[derive(Debug, Clone)]
pub struct CommandOracle {
    command: BuildCommand,
    working_dir: PathBuf,
    log: Option<PathBuf>,
}

impl CommandOracle {
    /// Creates an oracle running `command` in `working_dir`.
    #[must_use]
    pub fn new(command: BuildCommand, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            command,
            working_dir: working_dir.into(),
            log: None,
        }
    }

    /// Sends build output to `path`, truncating it now.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::BuildLog`] when the log cannot be created.
    pub fn with_log(mut self, log: impl Into<PathBuf>) -> Result<Self, HarnessError> {
        let path = log.into();
        File::create(&path).map_err(|error| HarnessError::build_log(path.clone(), &error))?;
        self.log = Some(path);
        Ok(self)
    }

    /// The command being run.
    #[must_use]
    pub const fn command(&self) -> &BuildCommand {
        &self.command
    }

    /// Directory the command runs in.
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn output_streams(&self) -> Result<(Stdio, Stdio), HarnessError> {
        let Some(path) = &self.log else {
            return Ok((Stdio::null(), Stdio::null()));
        };
        let log_error = |error: std::io::Error| HarnessError::build_log(path.clone(), &error);
        let stdout = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(log_error)?;
        let stderr = stdout.try_clone().map_err(log_error)?;
        Ok((Stdio::from(stdout), Stdio::from(stderr)))
    }
}

impl BuildOracle for CommandOracle {
    fn verify(&self) -> Result<BuildVerdict, HarnessError> {
        let (stdout, stderr) = self.output_streams()?;
        let started = Instant::now();

        let status = Command::new(self.command.program())
            .args(self.command.args())
            .current_dir(self.working_dir())
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .status()
            .map_err(|error| HarnessError::OracleUnavailable {
                program: self.command.program().to_owned(),
                message: error.to_string(),
            })?;

        let verdict = BuildVerdict::from(status.success());
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(
            target: ORACLE_TARGET,
            program = self.command.program(),
            dir = %self.working_dir().display(),
            exit_code = status.code(),
            elapsed_ms,
            ?verdict,
            "build finished"
        );
        Ok(verdict)
    }
}
