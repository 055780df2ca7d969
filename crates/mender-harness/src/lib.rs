//! Compile-gated source rewriting.
//!
//! The harness applies one single-line edit at a time to a source file, asks a
//! [`BuildOracle`] whether the tree still builds, and keeps the edit only if it
//! does. Rejected edits are reverted byte for byte and scanning resumes after
//! the rejected line; accepted edits become the new baseline and scanning
//! restarts from the top of the file.
//!
//! # Pieces
//!
//! - [`EditRule`] picks the next candidate line. [`ConstifyRule`] adds `const`
//!   to declarations of indexed types; [`IncludePruneRule`] drops includes.
//! - [`BuildOracle`] runs the build. [`CommandOracle`] shells out;
//!   [`ScriptedOracle`] and [`ClosureOracle`] stand in for a compiler in tests.
//! - [`Rewriter`] runs the state machine and returns a [`RunReport`], telling a
//!   [`RewriteListener`] about each attempt as it goes.

mod edit;
mod error;
mod oracle;
mod report;
mod rewriter;
mod rules;

pub use edit::EditCandidate;
pub use error::HarnessError;
pub use oracle::{BuildOracle, BuildVerdict, ClosureOracle, CommandOracle, ScriptedOracle};
pub use report::{AttemptOutcome, EditAttempt, FileReport, RunReport};
pub use rewriter::{RewriteListener, Rewriter, SilentListener};
pub use rules::{ConstifyRule, EditRule, IncludePruneRule};

#[cfg(test)]
mod tests;
