//! Removes `#include` directives the build does not need.

use std::path::Path;

use mender_scan::LineKind;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{EditRule, LineEdit, first_candidate};
use crate::edit::EditCandidate;

#[expect(
    clippy::expect_used,
    reason = "built-in patterns are literals exercised by the unit tests"
)]
fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern should compile")
}

static INCLUDE: Lazy<Regex> =
    Lazy::new(|| regex(r#"^\s*#\s*include\s*[<"](?P<target>[^>"]+)[>"]"#));

static KEEP_MARKER: Lazy<Regex> = Lazy::new(|| regex(r"//\s*keep\b"));

/// Proposes removing each `#include` line in turn.
///
/// Lines carrying a `// keep` comment are left alone, as is the include of a
/// file's own header (`Widget.cpp` including `Widget.h`).
#[derive(Debug, Default, Clone, Copy)]
pub struct IncludePruneRule;

impl IncludePruneRule {
    /// Creates the rule.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns true when `line` is an include this rule may remove from `path`.
    #[must_use]
    pub fn is_candidate(path: &Path, line: &str) -> bool {
        let Some(captures) = INCLUDE.captures(line) else {
            return false;
        };
        if KEEP_MARKER.is_match(line) {
            return false;
        }
        let target = captures.name("target").map_or("", |target| target.as_str());
        !is_own_header(path, target)
    }
}

impl EditRule for IncludePruneRule {
    fn name(&self) -> &str {
        "prune-includes"
    }

    fn find_candidate(
        &self,
        path: &Path,
        lines: &[&str],
        kinds: &[LineKind],
        from: usize,
    ) -> Option<EditCandidate> {
        first_candidate(path, lines, kinds, from, |line, kind| {
            (kind == LineKind::Preprocessor && Self::is_candidate(path, line))
                .then_some(LineEdit::Remove)
        })
    }
}

fn is_own_header(path: &Path, target: &str) -> bool {
    let Some(stem) = path.file_stem() else {
        return false;
    };
    let included = Path::new(target);
    included.file_stem() == Some(stem) && included.extension() != path.extension()
}
