//! Lexical declaration scanning.
//!
//! [`DeclarationScanner`] is the seam between the passes and whatever
//! recognises declarations. The shipped [`LexicalScanner`] matches one line at
//! a time with regular expressions: it does not evaluate preprocessor
//! conditionals, track scopes, or understand templates. Template declarations
//! are skipped on purpose, because template parameters are not safe rewrite
//! targets.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexer::{LineKind, classify_lines, strip_line_comment};

/// The syntactic form that introduced a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `class Name`
    Class,
    /// `struct Name`
    Struct,
    /// `union Name`
    Union,
    /// `enum Name` or `enum class Name`
    Enum,
    /// `using Name = ...` or `typedef ... Name;`
    Alias,
    /// `namespace Name`
    Namespace,
}

impl DeclarationKind {
    /// Returns true for kinds that introduce a type name.
    #[must_use]
    pub const fn is_type(self) -> bool {
        !matches!(self, Self::Namespace)
    }
}

/// A name introduced by a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    name: String,
    kind: DeclarationKind,
    line: usize,
}

impl Declaration {
    /// Builds a declaration found on the zero-based `line`.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: DeclarationKind, line: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            line,
        }
    }

    /// Bare declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaration form.
    #[must_use]
    pub const fn kind(&self) -> DeclarationKind {
        self.kind
    }

    /// Zero-based line number.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }
}

/// Recognises declarations in source text.
pub trait DeclarationScanner {
    /// Returns the declarations found in `text`, in source order.
    fn scan(&self, text: &str) -> Vec<Declaration>;
}

#[expect(
    clippy::expect_used,
    reason = "built-in patterns are literals exercised by the unit tests"
)]
fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern should compile")
}

static ENUM: Lazy<Regex> = Lazy::new(|| {
    regex(
        r"^\s*(?P<prefix>[^;{}()]*?)\benum\s+(?:class\s+|struct\s+)?(?:[A-Z_][A-Z0-9_]*\s+)*(?P<name>[A-Za-z_]\w*)\s*(?::\s*[\w:\s]+?)?\s*(?:;|\{|$)",
    )
});

static RECORD: Lazy<Regex> = Lazy::new(|| {
    regex(
        r"^\s*(?P<prefix>[^;{}()]*?)\b(?P<kind>class|struct|union)\s+(?:[A-Z_][A-Z0-9_]*\s+)*(?P<name>[A-Za-z_]\w*)\s*(?:final\b\s*)?(?:;|:[^:]|\{|$)",
    )
});

static ALIAS: Lazy<Regex> = Lazy::new(|| regex(r"^\s*using\s+(?P<name>[A-Za-z_]\w*)\s*="));

static TYPEDEF: Lazy<Regex> = Lazy::new(|| {
    regex(r"^\s*typedef\s+[^;()]*?\b(?P<name>[A-Za-z_]\w*)\s*(?:\[[^\]]*\]\s*)?;")
});

static NAMESPACE: Lazy<Regex> = Lazy::new(|| {
    regex(
        r"^\s*(?:inline\s+)?namespace\s+(?P<name>[A-Za-z_]\w*(?:\s*::\s*[A-Za-z_]\w*)*)\s*(?:\{|$)",
    )
});

static PREFIX_WORD: Lazy<Regex> = Lazy::new(|| {
    regex(r"\b(?:template|friend|using|return|new|sizeof|alignof|decltype)\b")
});

/// Regular-expression based scanner for class, struct, union, enum, alias and
/// namespace introductions.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexicalScanner;

impl LexicalScanner {
    /// Creates the scanner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn scan_line(line: &str, number: usize, out: &mut Vec<Declaration>) {
        if let Some(captures) = NAMESPACE.captures(line) {
            let names = captures.name("name").map_or("", |name| name.as_str());
            for name in names.split("::").map(str::trim) {
                out.push(Declaration::new(name, DeclarationKind::Namespace, number));
            }
            return;
        }

        if let Some(captures) = ALIAS.captures(line) {
            push_named(&captures, DeclarationKind::Alias, number, out);
            return;
        }

        if let Some(captures) = TYPEDEF.captures(line) {
            push_named(&captures, DeclarationKind::Alias, number, out);
            return;
        }

        if let Some(captures) = ENUM.captures(line) {
            if prefix_allowed(&captures) {
                push_named(&captures, DeclarationKind::Enum, number, out);
            }
            return;
        }

        if let Some(captures) = RECORD.captures(line) {
            if !prefix_allowed(&captures) {
                return;
            }
            let kind = match captures.name("kind").map(|kind| kind.as_str()) {
                Some("struct") => DeclarationKind::Struct,
                Some("union") => DeclarationKind::Union,
                _ => DeclarationKind::Class,
            };
            push_named(&captures, kind, number, out);
        }
    }
}

impl DeclarationScanner for LexicalScanner {
    fn scan(&self, text: &str) -> Vec<Declaration> {
        let lines: Vec<&str> = text.lines().collect();
        let kinds = classify_lines(&lines);
        let mut declarations = Vec::new();
        let mut after_template = false;

        for (number, (line, kind)) in lines.iter().zip(kinds).enumerate() {
            match kind {
                LineKind::Code => {}
                LineKind::Blank | LineKind::Comment => continue,
                LineKind::Preprocessor | LineKind::Continuation => {
                    after_template = false;
                    continue;
                }
            }

            let code = strip_line_comment(line);
            let opens_template = code.trim_start().starts_with("template");
            if !after_template && !opens_template {
                Self::scan_line(code, number, &mut declarations);
            }
            // A bare `template<...>` line applies to the declaration below it.
            after_template = opens_template && !code.contains(['{', ';']);
        }

        declarations
    }
}

fn prefix_allowed(captures: &regex::Captures<'_>) -> bool {
    let prefix = captures.name("prefix").map_or("", |prefix| prefix.as_str());
    !prefix.contains(['<', '>', '=', ',', ':', '*', '&']) && !PREFIX_WORD.is_match(prefix)
}

fn push_named(
    captures: &regex::Captures<'_>,
    kind: DeclarationKind,
    line: usize,
    out: &mut Vec<Declaration>,
) {
    if let Some(name) = captures.name("name") {
        out.push(Declaration::new(name.as_str(), kind, line));
    }
}
