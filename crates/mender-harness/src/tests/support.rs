//! Shared fixtures for rewriter tests.

use std::fs;
use std::path::{Path, PathBuf};

use mender_scan::{LexicalScanner, SymbolIndex, TreeWalker};
use rstest::fixture;
use tempfile::TempDir;

use crate::{AttemptOutcome, EditAttempt, RewriteListener};

/// A scratch engine tree with one indexed header.
pub(super) struct Tree {
    dir: TempDir,
}

impl Tree {
    pub(super) fn new() -> Self {
        let tree = Self {
            dir: TempDir::new().expect("temp dir"),
        };
        tree.source("editor/Widget.h", "#pragma once\nclass Widget;\n");
        tree
    }

    pub(super) fn source(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(&path, content).expect("write source");
        path
    }

    pub(super) fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).expect("read source")
    }

    pub(super) fn index(&self) -> SymbolIndex {
        let walker = TreeWalker::new(self.dir.path())
            .with_roots(["editor"])
            .with_extensions(["h"]);
        SymbolIndex::build(walker.walk(), &LexicalScanner::new()).expect("index builds")
    }
}

#[fixture]
pub(super) fn tree() -> Tree {
    Tree::new()
}

/// Collects attempt outcomes in order.
#[derive(Default)]
pub(super) struct RecordingListener {
    pub(super) outcomes: Vec<AttemptOutcome>,
}

impl RewriteListener for RecordingListener {
    fn attempt_finished(&mut self, _path: &Path, attempt: &EditAttempt) {
        self.outcomes.push(attempt.outcome());
    }
}
