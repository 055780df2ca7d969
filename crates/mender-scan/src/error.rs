//! Error types for tree walking and source file access.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while enumerating, reading or writing source files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScanError {
    /// A configured root directory does not exist.
    #[error("project root {} does not exist", path.display())]
    MissingRoot {
        /// The root that was looked up.
        path: PathBuf,
    },

    /// Directory traversal failed below a root.
    #[error("failed to walk {}: {message}", root.display())]
    Walk {
        /// Root being traversed when the failure happened.
        root: PathBuf,
        /// Description of the traversal failure.
        message: String,
    },

    /// A source file could not be read as UTF-8 text.
    #[error("failed to read file {}: {message}", path.display())]
    FileRead {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// A source file could not be written back.
    #[error("failed to write file {}: {message}", path.display())]
    FileWrite {
        /// Path to the file that could not be written.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}

impl ScanError {
    /// Creates a file read error.
    #[must_use]
    pub fn file_read(path: PathBuf, error: &std::io::Error) -> Self {
        Self::FileRead {
            path,
            message: error.to_string(),
        }
    }

    /// Creates a file write error.
    #[must_use]
    pub fn file_write(path: PathBuf, error: &std::io::Error) -> Self {
        Self::FileWrite {
            path,
            message: error.to_string(),
        }
    }
}
