//! Run-scoped accounting of edit attempts.

use std::path::{Path, PathBuf};

use crate::edit::EditCandidate;

/// Whether a tentative edit was kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The build passed and the edit became the new baseline.
    Committed,
    /// The build failed and the baseline was restored.
    Reverted,
}

/// One tentative edit and what became of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditAttempt {
    line: usize,
    original: String,
    replacement: Option<String>,
    outcome: AttemptOutcome,
}

impl EditAttempt {
    /// Records the outcome of `candidate`.
    #[must_use]
    pub fn new(candidate: &EditCandidate, outcome: AttemptOutcome) -> Self {
        Self {
            line: candidate.line(),
            original: candidate.original().to_owned(),
            replacement: candidate.replacement().map(str::to_owned),
            outcome,
        }
    }

    /// Zero-based line of the edit.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Line text before the edit.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Line text after the edit, or `None` for a removal.
    #[must_use]
    pub fn replacement(&self) -> Option<&str> {
        self.replacement.as_deref()
    }

    /// What happened to the edit.
    #[must_use]
    pub const fn outcome(&self) -> AttemptOutcome {
        self.outcome
    }

    /// Returns true when the edit was kept.
    #[must_use]
    pub const fn committed(&self) -> bool {
        matches!(self.outcome, AttemptOutcome::Committed)
    }
}

/// Attempts made on one file, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    path: PathBuf,
    attempts: Vec<EditAttempt>,
}

impl FileReport {
    /// Creates an empty report for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            attempts: Vec::new(),
        }
    }

    /// Appends an attempt.
    pub fn push(&mut self, attempt: EditAttempt) {
        self.attempts.push(attempt);
    }

    /// File the attempts were made on.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Attempts in the order they were made.
    #[must_use]
    pub fn attempts(&self) -> &[EditAttempt] {
        &self.attempts
    }

    /// Number of kept edits.
    #[must_use]
    pub fn committed(&self) -> usize {
        self.attempts.iter().filter(|attempt| attempt.committed()).count()
    }

    /// Number of reverted edits.
    #[must_use]
    pub fn reverted(&self) -> usize {
        self.attempts.len() - self.committed()
    }
}

/// Every file processed by one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    files: Vec<FileReport>,
}

impl RunReport {
    /// Appends a file report.
    pub fn push(&mut self, report: FileReport) {
        self.files.push(report);
    }

    /// File reports in processing order.
    #[must_use]
    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    /// Total kept edits.
    #[must_use]
    pub fn committed(&self) -> usize {
        self.files.iter().map(FileReport::committed).sum()
    }

    /// Total reverted edits.
    #[must_use]
    pub fn reverted(&self) -> usize {
        self.files.iter().map(FileReport::reverted).sum()
    }

    /// Number of files with at least one kept edit.
    #[must_use]
    pub fn changed_files(&self) -> usize {
        self.files.iter().filter(|file| file.committed() > 0).count()
    }
}
