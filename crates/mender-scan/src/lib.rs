//! Source tree access for the mender maintenance passes.
//!
//! This crate owns everything that reads the engine tree:
//!
//! - [`TreeWalker`] enumerates files below the configured project roots in a
//!   fixed, sorted order.
//! - [`SourceFile`] holds one file's text and writes it back atomically.
//! - [`classify_lines`] tags each line as code, comment, preprocessor or macro
//!   continuation so passes can leave the uninterpretable parts alone.
//! - [`LexicalScanner`] finds type and namespace declarations line by line,
//!   behind the [`DeclarationScanner`] trait.
//! - [`SymbolIndex`] maps declared type names to the project that declared
//!   them.

mod error;
mod index;
mod lexer;
mod scanner;
mod source;
mod walker;

pub use error::ScanError;
pub use index::SymbolIndex;
pub use lexer::{LineKind, classify_lines, strip_line_comment};
pub use scanner::{Declaration, DeclarationKind, DeclarationScanner, LexicalScanner};
pub use source::{SourceFile, normalize_path, write_atomic};
pub use walker::{SourcePath, TreeWalker};

#[cfg(test)]
mod tests;
