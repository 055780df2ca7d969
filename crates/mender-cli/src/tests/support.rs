//! Test support for CLI behaviour and unit coverage.
//!
//! Provides a scratch engine tree, a config loader that ignores the process
//! environment, and a world that captures both output streams.

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use mender_config::Config;
use rstest::fixture;
use tempfile::TempDir;

use crate::{AppError, ConfigLoader, IoStreams, run_with_loader};

/// A config loader that returns a fixed configuration.
pub(super) struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub(super) fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

/// CLI state against a scratch tree with a single `editor` project.
pub(super) struct TestWorld {
    pub(super) tree: TempDir,
    pub(super) config: Config,
    pub(super) stdout: Vec<u8>,
    pub(super) stderr: Vec<u8>,
    pub(super) exit_code: Option<ExitCode>,
}

impl TestWorld {
    pub(super) fn new() -> Self {
        let tree = TempDir::new().expect("temp dir");
        let base_dir =
            Utf8PathBuf::from_path_buf(tree.path().to_path_buf()).expect("utf-8 temp dir");
        let config = Config {
            base_dir,
            roots: vec![String::from("editor")],
            build_command: String::from("true"),
            ..Config::default()
        };
        Self {
            tree,
            config,
            stdout: Vec::new(),
            stderr: Vec::new(),
            exit_code: None,
        }
    }

    pub(super) fn path(&self, relative: &str) -> PathBuf {
        self.tree.path().join(relative)
    }

    pub(super) fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(&path, content).expect("write file");
        path
    }

    pub(super) fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("read file")
    }

    pub(super) fn run(&mut self, command: &str) {
        self.stdout.clear();
        self.stderr.clear();
        let args = Self::build_args(command);
        let loader = StaticConfigLoader::new(self.config.clone());
        let mut io = IoStreams::new(&mut self.stdout, &mut self.stderr);
        self.exit_code = Some(run_with_loader(args, &mut io, &loader));
    }

    pub(super) fn build_args(command: &str) -> Vec<OsString> {
        let mut args = vec![OsString::from("mender")];
        args.extend(
            command
                .split_whitespace()
                .map(|token| OsString::from(token.trim_matches('"'))),
        );
        args
    }

    pub(super) fn stdout_text(&self) -> String {
        String::from_utf8(self.stdout.clone()).expect("stdout utf8")
    }

    pub(super) fn stderr_text(&self) -> String {
        String::from_utf8(self.stderr.clone()).expect("stderr utf8")
    }

    pub(super) fn exit_code(&self) -> ExitCode {
        self.exit_code.expect("exit code recorded")
    }
}

#[fixture]
pub(super) fn world() -> TestWorld {
    TestWorld::new()
}
