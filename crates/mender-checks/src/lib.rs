//! Lexical checks and normalisation for the engine tree.
//!
//! Each [`Check`] inspects one file at a time and returns [`Warning`]s; nothing
//! here is fatal except failing to read a file. [`run_check`] drives a check
//! over a walk and gathers a [`CheckReport`].
//!
//! The whitespace pass is the one writer in this crate: [`normalize_files`]
//! rewrites only the files whose content actually changes.

mod check;
mod error;
mod guards;
mod includes;
mod license;
mod report;
mod whitespace;

pub use check::{Check, run_check};
pub use error::CheckError;
pub use guards::GuardCheck;
pub use includes::IncludeCheck;
pub use license::LicenseCheck;
pub use report::{CheckReport, Warning, WarningKind};
pub use whitespace::{NormalizeReport, TAB_WIDTH, normalize, normalize_file, normalize_files};

#[cfg(test)]
mod tests;
