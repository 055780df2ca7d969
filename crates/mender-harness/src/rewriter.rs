//! The compile-gated rewrite loop.
//!
//! Each file is driven through an explicit state machine:
//!
//! ```text
//! Scanning{from} -> CandidateFound -> EditApplied -> Verifying -> Committed -> Scanning{0}
//!               \                                             \-> Reverted  -> Scanning{line + 1}
//!                \-> Done
//! ```
//!
//! At every point the file on disk holds either the last committed baseline
//! or the baseline plus the one edit being verified.

use std::path::Path;

use mender_scan::{SourceFile, classify_lines};
use tracing::{debug, info, warn};

use crate::edit::EditCandidate;
use crate::error::HarnessError;
use crate::oracle::{BuildOracle, BuildVerdict};
use crate::report::{AttemptOutcome, EditAttempt, FileReport, RunReport};
use crate::rules::EditRule;

const REWRITER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::rewriter");

/// Where the loop is for the current file.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RewriteState {
    Scanning { from: usize },
    CandidateFound(EditCandidate),
    EditApplied { candidate: EditCandidate, tentative: String },
    Verifying { candidate: EditCandidate, tentative: String },
    Committed,
    Reverted { line: usize },
    Done,
}

/// Observes a run as it happens.
///
/// Every method has an empty default so observers implement only what they
/// render.
pub trait RewriteListener {
    /// A file is about to be scanned.
    fn file_started(&mut self, _path: &Path) {}

    /// A tentative edit has been verified and either kept or reverted.
    fn attempt_finished(&mut self, _path: &Path, _attempt: &EditAttempt) {}

    /// A file reached `Done`.
    fn file_finished(&mut self, _report: &FileReport) {}
}

/// A listener that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentListener;

impl RewriteListener for SilentListener {}

/// Applies one rule to files, keeping only edits the oracle accepts.
pub struct Rewriter<'a> {
    rule: &'a dyn EditRule,
    oracle: &'a dyn BuildOracle,
}

impl<'a> Rewriter<'a> {
    /// Creates a rewriter for `rule`, gated by `oracle`.
    #[must_use]
    pub fn new(rule: &'a dyn EditRule, oracle: &'a dyn BuildOracle) -> Self {
        Self { rule, oracle }
    }

    /// Checks the baseline, then rewrites each file in order.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::PreconditionFailed`] without touching any file
    /// when the baseline does not build. Oracle and I/O failures abort the run;
    /// a pending tentative edit is reverted first.
    pub fn run<I, P>(
        &self,
        files: I,
        listener: &mut dyn RewriteListener,
    ) -> Result<RunReport, HarnessError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.check_baseline()?;

        let mut report = RunReport::default();
        for entry in files {
            let path = entry.as_ref();
            listener.file_started(path);
            let file_report = self.rewrite_file(path, listener)?;
            listener.file_finished(&file_report);
            report.push(file_report);
        }

        info!(
            target: REWRITER_TARGET,
            rule = self.rule.name(),
            files = report.files().len(),
            committed = report.committed(),
            reverted = report.reverted(),
            "rewrite run finished"
        );
        Ok(report)
    }

    /// Verifies that the untouched tree builds.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::PreconditionFailed`] on a failing build, or the
    /// oracle's own error when it cannot run.
    pub fn check_baseline(&self) -> Result<(), HarnessError> {
        match self.oracle.verify()? {
            BuildVerdict::Pass => Ok(()),
            BuildVerdict::Fail => Err(HarnessError::PreconditionFailed),
        }
    }

    /// Drives one file to `Done`.
    ///
    /// # Errors
    ///
    /// Returns read, write and oracle failures. The file is restored to its
    /// last committed baseline before an oracle failure is returned.
    pub fn rewrite_file(
        &self,
        path: &Path,
        listener: &mut dyn RewriteListener,
    ) -> Result<FileReport, HarnessError> {
        let mut file = SourceFile::read(path)?;
        let mut report = FileReport::new(file.path());
        let mut state = RewriteState::Scanning { from: 0 };

        loop {
            state = match state {
                RewriteState::Done => break,
                other => self.step(other, &mut file, &mut report, listener)?,
            };
        }

        debug!(
            target: REWRITER_TARGET,
            path = %file.path().display(),
            committed = report.committed(),
            reverted = report.reverted(),
            "file done"
        );
        Ok(report)
    }

    fn step(
        &self,
        state: RewriteState,
        file: &mut SourceFile,
        report: &mut FileReport,
        listener: &mut dyn RewriteListener,
    ) -> Result<RewriteState, HarnessError> {
        let next = match state {
            RewriteState::Scanning { from } => self.scan(file, from),
            RewriteState::CandidateFound(candidate) => {
                let tentative = candidate.apply(file.content())?;
                file.write_content(&tentative)?;
                RewriteState::EditApplied {
                    candidate,
                    tentative,
                }
            }
            RewriteState::EditApplied {
                candidate,
                tentative,
            } => RewriteState::Verifying {
                candidate,
                tentative,
            },
            RewriteState::Verifying {
                candidate,
                tentative,
            } => {
                let verdict = self.verify_or_revert(file)?;
                let outcome = settle(file, &candidate, tentative, verdict)?;
                let attempt = EditAttempt::new(&candidate, outcome);
                listener.attempt_finished(file.path(), &attempt);
                report.push(attempt);
                match outcome {
                    AttemptOutcome::Committed => RewriteState::Committed,
                    AttemptOutcome::Reverted => RewriteState::Reverted {
                        line: candidate.line(),
                    },
                }
            }
            RewriteState::Committed => RewriteState::Scanning { from: 0 },
            RewriteState::Reverted { line } => RewriteState::Scanning { from: line + 1 },
            RewriteState::Done => RewriteState::Done,
        };
        Ok(next)
    }

    fn scan(&self, file: &SourceFile, from: usize) -> RewriteState {
        let lines = file.lines();
        let kinds = classify_lines(&lines);
        match self.rule.find_candidate(file.path(), &lines, &kinds, from) {
            Some(candidate) => {
                debug!(
                    target: REWRITER_TARGET,
                    path = %file.path().display(),
                    line = candidate.line() + 1,
                    original = candidate.original(),
                    "candidate found"
                );
                RewriteState::CandidateFound(candidate)
            }
            None => RewriteState::Done,
        }
    }

    /// Runs the oracle, restoring the baseline if it cannot answer.
    fn verify_or_revert(&self, file: &SourceFile) -> Result<BuildVerdict, HarnessError> {
        match self.oracle.verify() {
            Ok(verdict) => Ok(verdict),
            Err(error) => {
                file.write()?;
                Err(error)
            }
        }
    }
}

/// Commits or reverts the tentative content according to `verdict`.
fn settle(
    file: &mut SourceFile,
    candidate: &EditCandidate,
    tentative: String,
    verdict: BuildVerdict,
) -> Result<AttemptOutcome, HarnessError> {
    if verdict.is_pass() {
        file.replace_content(tentative);
        info!(
            target: REWRITER_TARGET,
            path = %file.path().display(),
            line = candidate.line() + 1,
            "edit committed"
        );
        Ok(AttemptOutcome::Committed)
    } else {
        file.write()?;
        warn!(
            target: REWRITER_TARGET,
            path = %file.path().display(),
            line = candidate.line() + 1,
            "edit broke the build; reverted"
        );
        Ok(AttemptOutcome::Reverted)
    }
}
