//! Single-line tentative edits.

use std::path::{Path, PathBuf};

use crate::error::HarnessError;

/// A proposed change to exactly one line of one file.
///
/// `replacement` of `None` removes the line together with its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCandidate {
    path: PathBuf,
    line: usize,
    original: String,
    replacement: Option<String>,
}

impl EditCandidate {
    /// Proposes replacing `original` on the zero-based `line` of `path`.
    #[must_use]
    pub fn replace(
        path: impl Into<PathBuf>,
        line: usize,
        original: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            line,
            original: original.into(),
            replacement: Some(replacement.into()),
        }
    }

    /// Proposes removing the zero-based `line` of `path`.
    #[must_use]
    pub fn remove(path: impl Into<PathBuf>, line: usize, original: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line,
            original: original.into(),
            replacement: None,
        }
    }

    /// File the candidate belongs to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Zero-based line index.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Line text before the edit, without its terminator.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Line text after the edit, or `None` when the line is removed.
    #[must_use]
    pub fn replacement(&self) -> Option<&str> {
        self.replacement.as_deref()
    }

    /// Returns `content` with this edit applied to its line only.
    ///
    /// Line terminators are preserved, so every other byte of `content` is
    /// carried over unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::EditApplication`] when the line does not exist
    /// or no longer holds the original text.
    pub fn apply(&self, content: &str) -> Result<String, HarnessError> {
        let mut output = String::with_capacity(content.len() + 8);
        let mut found = false;

        for (index, segment) in content.split_inclusive('\n').enumerate() {
            if index != self.line {
                output.push_str(segment);
                continue;
            }

            let (body, terminator) = split_terminator(segment);
            if body != self.original {
                return Err(self.application_error(format!(
                    "expected {:?} but found {body:?}",
                    self.original
                )));
            }
            if let Some(replacement) = &self.replacement {
                output.push_str(replacement);
                output.push_str(terminator);
            }
            found = true;
        }

        if found {
            Ok(output)
        } else {
            Err(self.application_error(String::from("line is past the end of the file")))
        }
    }

    fn application_error(&self, message: String) -> HarnessError {
        HarnessError::EditApplication {
            path: self.path.clone(),
            line: self.line,
            message,
        }
    }
}

fn split_terminator(segment: &str) -> (&str, &str) {
    let body = segment
        .strip_suffix('\n')
        .map_or(segment, |body| body.strip_suffix('\r').unwrap_or(body));
    let terminator = segment.get(body.len()..).unwrap_or_default();
    (body, terminator)
}
