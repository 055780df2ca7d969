//! Name-to-project index of declared types.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::ScanError;
use crate::scanner::{DeclarationKind, DeclarationScanner};
use crate::source::SourceFile;
use crate::walker::SourcePath;

const INDEX_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::index");

/// Mapping from bare type name to the project that declared it.
///
/// The index also remembers every namespace name it saw, which the rewrite
/// rules treat as recognised qualifiers. It is built once and then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolIndex {
    symbols: HashMap<String, String>,
    namespaces: HashSet<String>,
}

impl SymbolIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from a sequence of header files.
    ///
    /// Files are scanned in the order they are yielded. When a name is
    /// declared more than once, the last file to declare it wins.
    ///
    /// # Errors
    ///
    /// Returns the first walk or read error encountered.
    pub fn build<I>(files: I, scanner: &dyn DeclarationScanner) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = Result<SourcePath, ScanError>>,
    {
        let mut index = Self::new();
        let mut scanned = 0_usize;

        for item in files {
            let entry = item?;
            let file = SourceFile::read(entry.path())?;
            for declaration in scanner.scan(file.content()) {
                match declaration.kind() {
                    DeclarationKind::Namespace => index.insert_namespace(declaration.name()),
                    _ => index.insert(declaration.name(), entry.project()),
                }
            }
            scanned += 1;
        }

        debug!(
            target: INDEX_TARGET,
            files = scanned,
            symbols = index.len(),
            namespaces = index.namespaces.len(),
            "symbol index built"
        );
        Ok(index)
    }

    /// Records `name` as declared by `project`, replacing any earlier entry.
    pub fn insert(&mut self, name: impl Into<String>, project: impl Into<String>) {
        let symbol: String = name.into();
        let origin: String = project.into();
        if let Some(previous) = self.symbols.insert(symbol.clone(), origin.clone())
            && previous != origin
        {
            debug!(
                target: INDEX_TARGET,
                symbol = %symbol,
                previous = %previous,
                project = %origin,
                "duplicate declaration; keeping the later project"
            );
        }
    }

    /// Records a namespace name.
    pub fn insert_namespace(&mut self, name: impl Into<String>) {
        self.namespaces.insert(name.into());
    }

    /// Returns the project that declared `name`.
    #[must_use]
    pub fn provenance(&self, name: &str) -> Option<&str> {
        self.symbols.get(name).map(String::as_str)
    }

    /// Returns true when `name` is a known type.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Returns true when `name` was seen as a namespace.
    #[must_use]
    pub fn is_namespace(&self, name: &str) -> bool {
        self.namespaces.contains(name)
    }

    /// Number of known types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true when no types are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates over `(name, project)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.symbols
            .iter()
            .map(|(name, project)| (name.as_str(), project.as_str()))
    }
}

impl<N, P> FromIterator<(N, P)> for SymbolIndex
where
    N: Into<String>,
    P: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, P)>>(iter: T) -> Self {
        let mut index = Self::new();
        for (name, project) in iter {
            index.insert(name, project);
        }
        index
    }
}
