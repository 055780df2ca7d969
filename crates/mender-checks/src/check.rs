//! The checker seam and the loop that drives it over a tree.

use std::path::PathBuf;

use mender_scan::{ScanError, SourceFile};
use tracing::{debug, warn};

use crate::error::CheckError;
use crate::report::{CheckReport, Warning};

const CHECK_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::check");

/// A read-only lexical check over one file.
pub trait Check {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Returns every finding for `file`.
    fn check(&self, file: &SourceFile) -> Vec<Warning>;
}

/// Runs `check` over every file and gathers the warnings.
///
/// Missing project roots are logged and skipped; checkers never abort for a
/// root that is absent from this tree.
///
/// # Errors
///
/// Returns [`CheckError::Source`] when a file cannot be read or the walk
/// fails below a root.
pub fn run_check<I>(check: &dyn Check, files: I) -> Result<CheckReport, CheckError>
where
    I: IntoIterator<Item = Result<PathBuf, ScanError>>,
{
    let mut report = CheckReport::default();

    for entry in files {
        let path = match entry {
            Ok(path) => path,
            Err(ScanError::MissingRoot { path }) => {
                warn!(
                    target: CHECK_TARGET,
                    root = %path.display(),
                    "skipping missing project root"
                );
                continue;
            }
            Err(error) => return Err(error.into()),
        };
        let file = SourceFile::read(&path)?;
        let warnings = check.check(&file);
        for warning in &warnings {
            warn!(target: CHECK_TARGET, check = check.name(), "{warning}");
        }
        report.record(warnings);
    }

    debug!(
        target: CHECK_TARGET,
        check = check.name(),
        files = report.files_checked(),
        warnings = report.count(),
        "check finished"
    );
    Ok(report)
}
