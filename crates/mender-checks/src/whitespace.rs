//! Whitespace normalisation.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use mender_scan::{ScanError, SourceFile};
use tracing::{debug, info, warn};

use crate::error::CheckError;

const WHITESPACE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::whitespace");

/// Spaces substituted for each leading tab.
pub const TAB_WIDTH: usize = 4;

/// Returns `content` with leading tabs expanded, trailing blanks removed and a
/// final newline ensured.
///
/// Each line keeps its own terminator, so CRLF files stay CRLF. Content that
/// needs no change is borrowed back unchanged.
#[must_use]
pub fn normalize(content: &str) -> Cow<'_, str> {
    if content.is_empty() {
        return Cow::Borrowed(content);
    }

    let mut output = String::with_capacity(content.len());
    for segment in content.split_inclusive('\n') {
        let (raw, terminator) = match segment.strip_suffix('\n') {
            Some(line) => line
                .strip_suffix('\r')
                .map_or((line, "\n"), |stripped| (stripped, "\r\n")),
            None => (segment, ""),
        };
        let body = raw.trim_end_matches([' ', '\t']);
        let text = body.trim_start_matches('\t');
        let indent = body.len() - text.len();
        output.extend(std::iter::repeat_n(' ', indent * TAB_WIDTH));
        output.push_str(text);
        output.push_str(terminator);
    }
    if !output.ends_with('\n') {
        output.push('\n');
    }

    if output == content {
        Cow::Borrowed(content)
    } else {
        Cow::Owned(output)
    }
}

/// Outcome of a normalisation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    changed: Vec<PathBuf>,
    files_seen: usize,
}

impl NormalizeReport {
    /// Files that were rewritten.
    #[must_use]
    pub fn changed(&self) -> &[PathBuf] {
        &self.changed
    }

    /// Number of files inspected.
    #[must_use]
    pub const fn files_seen(&self) -> usize {
        self.files_seen
    }
}

/// Normalises one file in place, writing only when something changes.
///
/// # Errors
///
/// Returns read and write failures.
pub fn normalize_file(path: &Path) -> Result<bool, CheckError> {
    let mut file = SourceFile::read(path)?;
    let Cow::Owned(normalised) = normalize(file.content()) else {
        return Ok(false);
    };
    file.replace_content(normalised);
    file.write()?;
    debug!(target: WHITESPACE_TARGET, path = %file.path().display(), "normalised");
    Ok(true)
}

/// Normalises every file, skipping missing project roots.
///
/// # Errors
///
/// Returns the first read, write or walk failure.
pub fn normalize_files<I>(files: I) -> Result<NormalizeReport, CheckError>
where
    I: IntoIterator<Item = Result<PathBuf, ScanError>>,
{
    let mut report = NormalizeReport::default();
    for entry in files {
        let path = match entry {
            Ok(path) => path,
            Err(ScanError::MissingRoot { path }) => {
                warn!(
                    target: WHITESPACE_TARGET,
                    root = %path.display(),
                    "skipping missing project root"
                );
                continue;
            }
            Err(error) => return Err(error.into()),
        };
        report.files_seen += 1;
        if normalize_file(&path)? {
            report.changed.push(path);
        }
    }
    info!(
        target: WHITESPACE_TARGET,
        files = report.files_seen,
        changed = report.changed.len(),
        "whitespace normalised"
    );
    Ok(report)
}
