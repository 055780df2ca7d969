//! Enumerates source files below a set of project roots.
//!
//! Traversal order is fixed: roots are visited in the order they were
//! configured and, within a root, entries are visited depth-first sorted by
//! file name. Consumers that resolve duplicates by "last seen wins" (such as
//! [`SymbolIndex`](crate::SymbolIndex)) rely on this order.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ScanError;

/// A file found below a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePath {
    project: String,
    path: PathBuf,
}

impl SourcePath {
    /// Builds a source path for `project`.
    #[must_use]
    pub fn new(project: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            project: project.into(),
            path: path.into(),
        }
    }

    /// Name of the root directory the file was found under.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Path to the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consumes the value and returns the path.
    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Walks project roots for files with accepted extensions.
///
/// The walk is lazy and read-only. Symbolic links are not followed.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    base: PathBuf,
    roots: Vec<String>,
    extensions: Vec<String>,
}

impl TreeWalker {
    /// Creates a walker resolving roots against `base`.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            roots: Vec::new(),
            extensions: Vec::new(),
        }
    }

    /// Sets the root directory names, visited in the given order.
    #[must_use]
    pub fn with_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roots = roots.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the accepted extensions. Matching ignores case and a leading dot.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|extension| {
                extension
                    .as_ref()
                    .trim_start_matches('.')
                    .to_ascii_lowercase()
            })
            .collect();
        self
    }

    /// Returns true when `path` carries one of the accepted extensions.
    #[must_use]
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| {
                self.extensions
                    .iter()
                    .any(|accepted| accepted.eq_ignore_ascii_case(extension))
            })
    }

    /// Lazily yields every accepted file below every root.
    ///
    /// A root that does not exist yields a single [`ScanError::MissingRoot`]
    /// item; traversal errors below a root yield [`ScanError::Walk`] items.
    /// Both leave the decision to abort or skip with the caller.
    pub fn walk(&self) -> impl Iterator<Item = Result<SourcePath, ScanError>> + '_ {
        self.roots.iter().flat_map(move |root| self.walk_root(root))
    }

    fn walk_root<'a>(
        &'a self,
        root: &'a str,
    ) -> Box<dyn Iterator<Item = Result<SourcePath, ScanError>> + 'a> {
        let root_path = self.base.join(root);
        if !root_path.is_dir() {
            return Box::new(std::iter::once(Err(ScanError::MissingRoot {
                path: root_path,
            })));
        }

        let entries = WalkDir::new(&root_path)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        Box::new(entries.filter_map(move |item| match item {
            Ok(entry) => (entry.file_type().is_file() && self.accepts(entry.path()))
                .then(|| Ok(SourcePath::new(root, entry.into_path()))),
            Err(error) => Some(Err(ScanError::Walk {
                root: root_path.clone(),
                message: error.to_string(),
            })),
        }))
    }
}
