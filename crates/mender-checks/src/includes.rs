//! Include-resolution check.

use std::path::Path;

use mender_scan::{LineKind, SourceFile, classify_lines};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::check::Check;
use crate::report::{Warning, WarningKind};

#[expect(
    clippy::expect_used,
    reason = "built-in patterns are literals exercised by the unit tests"
)]
fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern should compile")
}

static INCLUDE: Lazy<Regex> =
    Lazy::new(|| regex(r#"^\s*#\s*include\s*[<"](?P<target>[^>"]+)[>"]"#));

/// Warns about includes that point nowhere known.
///
/// Only targets containing a `/` are checked; bare names such as `<vector>`
/// are taken to be system headers. A checked target resolves when its first
/// component is a project root, or when it names an existing file relative to
/// the including file.
#[derive(Debug, Clone)]
pub struct IncludeCheck {
    projects: Vec<String>,
}

impl IncludeCheck {
    /// Creates a check resolving against the given project names.
    #[must_use]
    pub fn new<I, S>(projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            projects: projects.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true when `target`, included from `from`, resolves.
    #[must_use]
    pub fn resolves(&self, from: &Path, target: &str) -> bool {
        if !target.contains('/') {
            return true;
        }
        let first = target.split('/').next().unwrap_or_default();
        if self.projects.iter().any(|project| project == first) {
            return true;
        }
        from.parent()
            .is_some_and(|directory| directory.join(target).is_file())
    }
}

impl Check for IncludeCheck {
    fn name(&self) -> &str {
        "check-includes"
    }

    fn check(&self, file: &SourceFile) -> Vec<Warning> {
        let lines = file.lines();
        let kinds = classify_lines(&lines);

        lines
            .iter()
            .zip(kinds)
            .enumerate()
            .filter(|(_, (_, kind))| *kind == LineKind::Preprocessor)
            .filter_map(|(index, (line, _))| {
                let target = INCLUDE.captures(line)?.name("target")?.as_str();
                (!self.resolves(file.path(), target)).then(|| {
                    Warning::new(
                        file.path(),
                        WarningKind::UnresolvedReference,
                        format!("unresolved include \"{target}\""),
                    )
                    .at_line(index)
                })
            })
            .collect()
    }
}
