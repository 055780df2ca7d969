//! Warnings produced by lexical checks.

use std::fmt;
use std::path::{Path, PathBuf};

/// What a warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A header has neither `#pragma once` nor an `#ifndef`/`#define` pair.
    MissingGuards,
    /// A file does not open with the license comment.
    MissingLicense,
    /// An include target cannot be matched to a project or a file.
    UnresolvedReference,
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    path: PathBuf,
    line: Option<usize>,
    kind: WarningKind,
    message: String,
}

impl Warning {
    /// Builds a file-level warning.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line: None,
            kind,
            message: message.into(),
        }
    }

    /// Attaches a zero-based line number.
    #[must_use]
    pub const fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// File the warning is about.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Zero-based line, when the warning points at one.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        self.line
    }

    /// Category of the warning.
    #[must_use]
    pub const fn kind(&self) -> WarningKind {
        self.kind
    }

    /// Human-readable description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line + 1)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Warnings gathered over one run, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    warnings: Vec<Warning>,
    files_checked: usize,
}

impl CheckReport {
    /// Adds the findings for one file.
    pub fn record(&mut self, warnings: impl IntoIterator<Item = Warning>) {
        self.files_checked += 1;
        self.warnings.extend(warnings);
    }

    /// All warnings.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Number of warnings.
    #[must_use]
    pub fn count(&self) -> usize {
        self.warnings.len()
    }

    /// Returns true when nothing was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of files inspected.
    #[must_use]
    pub const fn files_checked(&self) -> usize {
        self.files_checked
    }
}
