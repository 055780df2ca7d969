//! Inserts `const` in front of local declarations of indexed types.

use std::path::Path;

use mender_scan::{LineKind, SymbolIndex, strip_line_comment};
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

/// `[specifiers] Type[<args>] [*&] name rest`
static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    regex(
        r"^(?P<specifiers>(?:(?:static|inline|thread_local|extern)\s+)*)(?P<type>(?:[A-Za-z_]\w*\s*::\s*)*[A-Za-z_]\w*)(?P<args>\s*<[^;]*>)?(?P<suffix>\s*[*&]+\s*|\s+)(?P<name>[A-Za-z_]\w*)\s*(?P<rest>[=;({\[,].*)$",
    )
});

static IMMUTABLE: Lazy<Regex> = Lazy::new(|| regex(r"\b(?:const|constexpr|consteval|constinit)\b"));

static EXCLUDED_WORD: Lazy<Regex> =
    Lazy::new(|| regex(r"\b(?:operator|virtual|override|final|template|mutable)\b"));

static TYPED_PARAMETER: Lazy<Regex> = Lazy::new(|| {
    regex(
        r"^(?:(?:const|volatile|unsigned|signed|struct|class|enum)\s+)*[A-Za-z_][\w:]*(?:\s*<[^()]*>)?(?:\s*[*&]+\s*|\s+)[A-Za-z_]\w*(?:\s*=.*)?$|^[A-Za-z_][\w:]*(?:\s*<[^()]*>)?\s*[*&]+$|^(?:void|bool|char|short|int|long|float|double|auto|unsigned|signed)$",
    )
});

/// Statement keywords that never open a declaration.
const NON_DECLARATION_KEYWORDS: &[&str] = &[
    "return",
    "using",
    "typedef",
    "class",
    "struct",
    "union",
    "enum",
    "friend",
    "delete",
    "new",
    "case",
    "default",
    "goto",
    "else",
    "if",
    "for",
    "while",
    "do",
    "switch",
    "throw",
    "template",
    "namespace",
    "public",
    "private",
    "protected",
    "static_assert",
    "co_return",
    "co_yield",
    "co_await",
];

/// Proposes `const` for declarations whose type is a known symbol.
///
/// A line qualifies when it is plain code ending in `;`, declares a variable
/// of a type found in the [`SymbolIndex`] (possibly behind `*`, `&`, template
/// arguments or indexed namespace qualifiers), and is not already immutable.
/// Function prototypes and definitions, operator overloads, virtual members and
/// template lines never qualify.
#[derive(Debug, Clone, Copy)]
pub struct ConstifyRule<'a> {
    index: &'a SymbolIndex,
}

impl<'a> ConstifyRule<'a> {
    /// Creates the rule over a built index.
    #[must_use]
    pub const fn new(index: &'a SymbolIndex) -> Self {
        Self { index }
    }

    /// Returns the replacement for `line`, if it is a candidate.
    #[must_use]
    pub fn propose(&self, line: &str) -> Option<String> {
        let code = strip_line_comment(line).trim_end();
        let body = code.trim_start();
        let indent = code.len() - body.len();

        if !body.ends_with(';') || starts_with_keyword(body) {
            return None;
        }
        if EXCLUDED_WORD.is_match(body) || IMMUTABLE.is_match(declaration_head(body)) {
            return None;
        }

        let captures = DECLARATION.captures(body)?;
        let type_token = captures.name("type")?;
        let rest = captures.name("rest").map_or("", |rest| rest.as_str());

        if !self.is_known_type(type_token.as_str()) || self.is_function(rest) {
            return None;
        }

        let insert_at = indent + type_token.start();
        let (before, after) = line.split_at_checked(insert_at)?;
        Some(format!("{before}const {after}"))
    }

    fn is_known_type(&self, token: &str) -> bool {
        let mut parts: Vec<&str> = token.split("::").map(str::trim).collect();
        let Some(name) = parts.pop() else {
            return false;
        };
        self.index.contains(name) && parts.iter().all(|part| self.index.is_namespace(part))
    }

    /// Returns true when `rest` is a parameter list rather than constructor
    /// arguments: `()`, any typed parameter, an unnamed parameter of an
    /// indexed type, or a body opening after the list.
    fn is_function(&self, rest: &str) -> bool {
        let Some(after_paren) = rest.strip_prefix('(') else {
            return false;
        };
        let Some(close) = after_paren.rfind(')') else {
            return true;
        };
        let (inner, tail) = after_paren.split_at(close);
        if tail.trim_start_matches(')').trim() != ";" {
            return true;
        }
        let parameters = inner.trim();
        parameters.is_empty()
            || split_top_level(parameters).iter().any(|parameter| {
                TYPED_PARAMETER.is_match(parameter.trim()) || self.names_indexed_type(parameter)
            })
    }

    /// Returns true when `parameter` is just an indexed type, as in the
    /// unnamed parameter of `Widget make(Vector);`.
    fn names_indexed_type(&self, parameter: &str) -> bool {
        let token = parameter
            .trim()
            .trim_start_matches("const ")
            .trim_end_matches(['*', '&', ' '])
            .trim();
        !token.is_empty() && self.is_known_type(token)
    }
}

impl EditRule for ConstifyRule<'_> {
    fn name(&self) -> &str {
        "constify"
    }

    fn find_candidate(
        &self,
        path: &Path,
        lines: &[&str],
        kinds: &[LineKind],
        from: usize,
    ) -> Option<EditCandidate> {
        first_candidate(path, lines, kinds, from, |line, kind| {
            if kind.is_code() {
                self.propose(line).map(LineEdit::Replace)
            } else {
                None
            }
        })
    }
}

fn starts_with_keyword(body: &str) -> bool {
    let first = body
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .next()
        .unwrap_or_default();
    NON_DECLARATION_KEYWORDS.contains(&first)
}

/// Text before the initialiser, where qualifiers of the declaration live.
fn declaration_head(body: &str) -> &str {
    body.split_once('=').map_or(body, |(head, _)| head)
}

/// Splits on commas that are not nested in brackets.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0;
    for (index, character) in text.char_indices() {
        match character {
            '(' | '<' | '[' | '{' => depth += 1,
            ')' | '>' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(text.get(start..index).unwrap_or_default());
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(text.get(start..).unwrap_or_default());
    parts
}
