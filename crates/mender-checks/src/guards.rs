//! Include-guard check for headers.

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

static PRAGMA_ONCE: Lazy<Regex> = Lazy::new(|| regex(r"^\s*#\s*pragma\s+once\b"));
static CONDITIONAL: Lazy<Regex> =
    Lazy::new(|| regex(r"^\s*#\s*(?P<directive>if|ifdef|ifndef)\b\s*(?P<name>\w*)"));
static DEFINE: Lazy<Regex> = Lazy::new(|| regex(r"^\s*#\s*define\s+(?P<name>\w+)"));

/// Warns about headers that can be included twice.
///
/// A header is guarded by a `#pragma once` anywhere outside comments, or by an
/// `#ifndef X` as its first conditional directly followed, as the next
/// directive, by `#define X`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GuardCheck;

impl GuardCheck {
    /// Returns true when `content` is protected against double inclusion.
    #[must_use]
    pub fn is_guarded(content: &str) -> bool {
        let lines: Vec<&str> = content.lines().collect();
        let kinds = classify_lines(&lines);
        let directives: Vec<&str> = lines
            .iter()
            .zip(kinds)
            .filter(|(_, kind)| *kind == LineKind::Preprocessor)
            .map(|(line, _)| *line)
            .collect();

        if directives.iter().any(|line| PRAGMA_ONCE.is_match(line)) {
            return true;
        }

        let Some((position, guard)) = directives
            .iter()
            .enumerate()
            .find_map(|(position, line)| CONDITIONAL.captures(line).map(|c| (position, c)))
        else {
            return false;
        };
        if guard.name("directive").map(|d| d.as_str()) != Some("ifndef") {
            return false;
        }
        let macro_name = guard.name("name").map_or("", |name| name.as_str());
        directives
            .get(position + 1)
            .and_then(|line| DEFINE.captures(line))
            .and_then(|define| define.name("name"))
            .is_some_and(|name| !macro_name.is_empty() && name.as_str() == macro_name)
    }
}

impl Check for GuardCheck {
    fn name(&self) -> &str {
        "check-guards"
    }

    fn check(&self, file: &SourceFile) -> Vec<Warning> {
        if Self::is_guarded(file.content()) {
            Vec::new()
        } else {
            vec![Warning::new(
                file.path(),
                WarningKind::MissingGuards,
                "missing include guards",
            )]
        }
    }
}
