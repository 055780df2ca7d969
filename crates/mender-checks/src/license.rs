//! License-header check.

use mender_scan::SourceFile;

use crate::check::Check;
use crate::report::{Warning, WarningKind};

/// Warns about files that do not open with the license comment.
///
/// After optional blank lines the file must start with a `/* ... */` block
/// that contains the marker text.
#[derive(Debug, Clone)]
pub struct LicenseCheck {
    marker: String,
}

impl LicenseCheck {
    /// Creates a check looking for `marker`.
    #[must_use]
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// Returns the leading block comment of `content`, if it has one.
    #[must_use]
    pub fn leading_comment(content: &str) -> Option<&str> {
        let trimmed = content.trim_start();
        let body = trimmed.strip_prefix("/*")?;
        let end = body.find("*/")?;
        body.get(..end)
    }

    /// Returns true when `content` carries the license header.
    #[must_use]
    pub fn has_header(&self, content: &str) -> bool {
        Self::leading_comment(content).is_some_and(|comment| comment.contains(&self.marker))
    }
}

impl Check for LicenseCheck {
    fn name(&self) -> &str {
        "check-license"
    }

    fn check(&self, file: &SourceFile) -> Vec<Warning> {
        if self.has_header(file.content()) {
            Vec::new()
        } else {
            vec![Warning::new(
                file.path(),
                WarningKind::MissingLicense,
                "missing license header",
            )]
        }
    }
}
