//! Operator-facing transcript written to stdout.
//!
//! One line per verified edit, then a summary; checkers print one line per
//! warning and a count.

use std::io::{self, Write};
use std::path::Path;

use mender_checks::{CheckReport, NormalizeReport};
use mender_harness::{AttemptOutcome, EditAttempt, RewriteListener, RunReport};

/// Formats one edit attempt.
pub(crate) fn attempt_line(path: &Path, attempt: &EditAttempt) -> String {
    let status = match attempt.outcome() {
        AttemptOutcome::Committed => "Success",
        AttemptOutcome::Reverted => "Failed",
    };
    let change = attempt
        .replacement()
        .map_or_else(|| String::from("(removed)"), |line| line.trim().to_owned());
    format!(
        "{status}: {}:{}: {} -> {change}",
        path.display(),
        attempt.line() + 1,
        attempt.original().trim(),
    )
}

/// Writes attempts as they finish, remembering the first write failure.
pub(crate) struct TranscriptListener<'a, W: Write> {
    out: &'a mut W,
    error: Option<io::Error>,
}

impl<'a, W: Write> TranscriptListener<'a, W> {
    pub(crate) const fn new(out: &'a mut W) -> Self {
        Self { out, error: None }
    }

    /// Returns the first write failure, if any.
    pub(crate) fn finish(self) -> io::Result<()> {
        self.error.map_or(Ok(()), Err)
    }

    fn emit(&mut self, line: &str) {
        if self.error.is_none()
            && let Err(error) = writeln!(self.out, "{line}")
        {
            self.error = Some(error);
        }
    }
}

impl<W: Write> RewriteListener for TranscriptListener<'_, W> {
    fn attempt_finished(&mut self, path: &Path, attempt: &EditAttempt) {
        self.emit(&attempt_line(path, attempt));
    }
}

pub(crate) fn write_run_summary(out: &mut impl Write, report: &RunReport) -> io::Result<()> {
    writeln!(
        out,
        "{} edit(s) committed, {} reverted, {} file(s) changed",
        report.committed(),
        report.reverted(),
        report.changed_files()
    )
}

pub(crate) fn write_check_report(out: &mut impl Write, report: &CheckReport) -> io::Result<()> {
    for warning in report.warnings() {
        writeln!(out, "{warning}")?;
    }
    writeln!(out, "{} warning(s)", report.count())
}

pub(crate) fn write_normalize_report(
    out: &mut impl Write,
    report: &NormalizeReport,
) -> io::Result<()> {
    for path in report.changed() {
        writeln!(out, "normalized {}", path.display())?;
    }
    writeln!(
        out,
        "{} of {} file(s) changed",
        report.changed().len(),
        report.files_seen()
    )
}
