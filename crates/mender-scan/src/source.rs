//! Whole-file text buffers with atomic write-back.
//!
//! A [`SourceFile`] is only ever changed by replacing its entire content, and
//! is only ever written by renaming a fully written sibling temporary file over
//! the target. A reader of the path therefore observes either the previous
//! content or the new content, never a mixture.

use std::fs;
use std::io::Write as IoWrite;
use std::path::{Component, Path, PathBuf};

use crate::error::ScanError;

/// A text file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    content: String,
}

impl SourceFile {
    /// Reads `path` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::FileRead`] when the file is missing, unreadable or
    /// not valid UTF-8.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ScanError> {
        let normalised = normalize_path(path.as_ref());
        let content = fs::read_to_string(&normalised)
            .map_err(|error| ScanError::file_read(normalised.clone(), &error))?;
        Ok(Self {
            path: normalised,
            content,
        })
    }

    /// Builds an in-memory file without touching the filesystem.
    #[must_use]
    pub fn from_parts(path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
            content: content.into(),
        }
    }

    /// Normalised path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Lines of the current content without their terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        self.content.lines().collect()
    }

    /// Replaces the whole content in memory.
    pub fn replace_content(&mut self, content: String) {
        self.content = content;
    }

    /// Writes the current content to disk atomically.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::FileWrite`] when the temporary file cannot be
    /// created, written or renamed over the target.
    pub fn write(&self) -> Result<(), ScanError> {
        write_atomic(&self.path, &self.content)
    }

    /// Writes `content` to this file's path atomically, leaving the in-memory
    /// content untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::FileWrite`] on I/O failure.
    pub fn write_content(&self, content: &str) -> Result<(), ScanError> {
        write_atomic(&self.path, content)
    }
}

/// Writes `content` to `path` through a sibling temporary file and a rename.
///
/// The permissions of an existing target are carried over to the new file.
///
/// # Errors
///
/// Returns [`ScanError::FileWrite`] on I/O failure.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), ScanError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)
        .map_err(|error| ScanError::file_write(path.to_path_buf(), &error))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|error| ScanError::file_write(path.to_path_buf(), &error))?;

    if let Ok(metadata) = fs::metadata(path) {
        temp_file
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(|error| ScanError::file_write(path.to_path_buf(), &error))?;
    }

    temp_file
        .persist(path)
        .map_err(|error| ScanError::file_write(path.to_path_buf(), &error.error))?;

    Ok(())
}

/// Lexically normalises a path: drops `.` components and folds `..` into the
/// preceding normal component where one exists.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalised = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    normalised.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalised.pop();
                } else {
                    normalised.push(component);
                }
            }
            other => normalised.push(other),
        }
    }
    if normalised.as_os_str().is_empty() {
        normalised.push(".");
    }
    normalised
}
