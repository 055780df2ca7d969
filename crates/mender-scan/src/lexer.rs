//! Line classification for C and C++ sources.
//!
//! This is a deliberately shallow lexer: it tracks block comments, string
//! literals and macro continuations across lines and nothing else. Passes use
//! the classification to keep comment regions and multi-line macros out of
//! candidacy rather than guessing at what they mean.

/// What a physical line of source text is, as far as the passes care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only.
    Blank,
    /// Starts with code (it may end with a trailing comment).
    Code,
    /// Starts inside or with a comment.
    Comment,
    /// A preprocessor directive (`#include`, `#define`, ...).
    Preprocessor,
    /// Follows a line ending with a backslash.
    Continuation,
}

impl LineKind {
    /// Returns true for lines that start with code.
    #[must_use]
    pub const fn is_code(self) -> bool {
        matches!(self, Self::Code)
    }
}

/// Classifies every line of `lines`.
///
/// The returned vector has the same length as the input.
#[must_use]
pub fn classify_lines(lines: &[&str]) -> Vec<LineKind> {
    let mut kinds = Vec::with_capacity(lines.len());
    let mut in_block = false;
    let mut continued = false;

    for line in lines {
        let trimmed = line.trim_start();
        let kind = if continued {
            LineKind::Continuation
        } else if in_block || trimmed.starts_with("//") || trimmed.starts_with("/*") {
            LineKind::Comment
        } else if trimmed.is_empty() {
            LineKind::Blank
        } else if trimmed.starts_with('#') {
            LineKind::Preprocessor
        } else {
            LineKind::Code
        };

        in_block = block_comment_open_after(line, in_block);
        continued = !in_block && line.trim_end().ends_with('\\');
        kinds.push(kind);
    }

    kinds
}

/// Returns whether a block comment is still open at the end of `line`.
fn block_comment_open_after(line: &str, mut in_block: bool) -> bool {
    let bytes = line.as_bytes();
    let mut quote: Option<u8> = None;
    let mut index = 0;

    while let Some(&byte) = bytes.get(index) {
        let next = bytes.get(index + 1).copied();
        if in_block {
            if byte == b'*' && next == Some(b'/') {
                in_block = false;
                index += 2;
                continue;
            }
        } else if let Some(open) = quote {
            if byte == b'\\' {
                index += 2;
                continue;
            }
            if byte == open {
                quote = None;
            }
        } else {
            match (byte, next) {
                (b'/', Some(b'/')) => break,
                (b'/', Some(b'*')) => {
                    in_block = true;
                    index += 2;
                    continue;
                }
                (b'"' | b'\'', _) => quote = Some(byte),
                _ => {}
            }
        }
        index += 1;
    }

    in_block
}

/// Returns the code portion of `line`, with any trailing `//` comment removed.
///
/// String literals are respected, so `"http://"` is kept intact.
#[must_use]
pub fn strip_line_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut quote: Option<u8> = None;
    let mut index = 0;

    while let Some(&byte) = bytes.get(index) {
        match quote {
            Some(_) if byte == b'\\' => {
                index += 2;
                continue;
            }
            Some(open) if byte == open => quote = None,
            Some(_) => {}
            None => match (byte, bytes.get(index + 1)) {
                (b'/', Some(b'/')) => return line.get(..index).unwrap_or(line),
                (b'"' | b'\'', _) => quote = Some(byte),
                _ => {}
            },
        }
        index += 1;
    }

    line
}
