//! Line-level edit rules.
//!
//! A rule decides which line of the current content is the next candidate and
//! what it would become. Rules never touch the filesystem; the rewriter owns
//! every write.

mod constify;
mod include;

use std::path::Path;

use mender_scan::LineKind;

pub use constify::ConstifyRule;
pub use include::IncludePruneRule;

use crate::edit::EditCandidate;

/// A predicate and replacement for single-line edits.
pub trait EditRule {
    /// Short name used in logs and transcripts.
    fn name(&self) -> &str;

    /// Returns the first candidate at or after the zero-based line `from`.
    ///
    /// `kinds` holds the classification of every line in `lines`.
    fn find_candidate(
        &self,
        path: &Path,
        lines: &[&str],
        kinds: &[LineKind],
        from: usize,
    ) -> Option<EditCandidate>;
}

/// What a rule wants to do with a single line.
pub(crate) enum LineEdit {
    Replace(String),
    Remove,
}

/// Walks `lines` from `from`, returning the first line `propose` accepts.
pub(crate) fn first_candidate<F>(
    path: &Path,
    lines: &[&str],
    kinds: &[LineKind],
    from: usize,
    mut propose: F,
) -> Option<EditCandidate>
where
    F: FnMut(&str, LineKind) -> Option<LineEdit>,
{
    lines
        .iter()
        .zip(kinds.iter().copied())
        .enumerate()
        .skip(from)
        .find_map(|(index, (line, kind))| {
            propose(line, kind).map(|edit| match edit {
                LineEdit::Replace(replacement) => {
                    EditCandidate::replace(path, index, *line, replacement)
                }
                LineEdit::Remove => EditCandidate::remove(path, index, *line),
            })
        })
}
