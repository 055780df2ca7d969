//! Layered configuration shared by the Mender maintenance passes.
//!
//! Values are resolved in increasing order of precedence: built-in defaults,
//! an optional TOML file named with `--config-path`, `MENDER_*` environment
//! variables and finally command-line flags. List-valued settings that are
//! left empty fall back to built-in lists such as [`DEFAULT_ROOTS`].

mod build;
mod defaults;
mod logging;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use build::{BuildCommand, BuildCommandError};
pub use defaults::{
    DEFAULT_BUILD_COMMAND, DEFAULT_HEADER_EXTENSIONS, DEFAULT_LICENSE_MARKER, DEFAULT_LOG_FILTER,
    DEFAULT_ROOTS, DEFAULT_SOURCE_EXTENSIONS, default_base_dir, default_build_command_string,
    default_build_dir, default_license_marker_string, default_log_filter,
    default_log_filter_string, default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Runtime configuration for the `mender` binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "MENDER")]
pub struct Config {
    /// Tracing filter expression, for example `info` or `mender_harness=debug`.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for diagnostic logs written to stderr.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Directory that project roots are resolved against.
    #[ortho_config(default = default_base_dir())]
    pub base_dir: Utf8PathBuf,
    /// Project directory names, relative to `base_dir`.
    #[serde(default)]
    #[ortho_config(merge_strategy = "append")]
    pub roots: Vec<String>,
    /// Extensions of header files, without the leading dot.
    #[serde(default)]
    #[ortho_config(merge_strategy = "append")]
    pub header_extensions: Vec<String>,
    /// Extensions of translation units, without the leading dot.
    #[serde(default)]
    #[ortho_config(merge_strategy = "append")]
    pub source_extensions: Vec<String>,
    /// Command line whose exit status gates every tentative edit.
    #[ortho_config(default = default_build_command_string())]
    pub build_command: String,
    /// Working directory of the build command, relative to `base_dir`.
    #[ortho_config(default = default_build_dir())]
    pub build_dir: Utf8PathBuf,
    /// File receiving build output; output is discarded when unset.
    #[serde(default)]
    pub build_log: Option<Utf8PathBuf>,
    /// Text the leading comment of each file must contain.
    #[ortho_config(default = default_license_marker_string())]
    pub license_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            base_dir: default_base_dir(),
            roots: Vec::new(),
            header_extensions: Vec::new(),
            source_extensions: Vec::new(),
            build_command: default_build_command_string(),
            build_dir: default_build_dir(),
            build_log: None,
            license_marker: default_license_marker_string(),
        }
    }
}

impl Config {
    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Base directory for roots.
    #[must_use]
    pub fn base_dir(&self) -> &Utf8Path {
        &self.base_dir
    }

    /// Configured project roots, or [`DEFAULT_ROOTS`] when none are set.
    #[must_use]
    pub fn roots(&self) -> Vec<String> {
        or_defaults(&self.roots, DEFAULT_ROOTS)
    }

    /// Header extensions, or [`DEFAULT_HEADER_EXTENSIONS`] when none are set.
    #[must_use]
    pub fn header_extensions(&self) -> Vec<String> {
        or_defaults(&self.header_extensions, DEFAULT_HEADER_EXTENSIONS)
    }

    /// Source extensions, or [`DEFAULT_SOURCE_EXTENSIONS`] when none are set.
    #[must_use]
    pub fn source_extensions(&self) -> Vec<String> {
        or_defaults(&self.source_extensions, DEFAULT_SOURCE_EXTENSIONS)
    }

    /// Header and source extensions combined, headers first.
    #[must_use]
    pub fn all_extensions(&self) -> Vec<String> {
        let mut extensions = self.header_extensions();
        extensions.extend(self.source_extensions());
        extensions
    }

    /// Parses the configured build command.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildCommandError`] when the command is blank or its
    /// quoting is unbalanced.
    pub fn build_command(&self) -> Result<BuildCommand, BuildCommandError> {
        BuildCommand::parse(&self.build_command)
    }

    /// Build working directory resolved against the base directory.
    #[must_use]
    pub fn build_dir(&self) -> Utf8PathBuf {
        self.base_dir.join(&self.build_dir)
    }

    /// Build log resolved against the base directory, when configured.
    #[must_use]
    pub fn build_log(&self) -> Option<Utf8PathBuf> {
        self.build_log.as_ref().map(|path| self.base_dir.join(path))
    }

    /// License marker text.
    #[must_use]
    pub fn license_marker(&self) -> &str {
        &self.license_marker
    }
}

fn or_defaults(values: &[String], defaults: &[&str]) -> Vec<String> {
    if values.is_empty() {
        defaults::owned(defaults)
    } else {
        values.to_vec()
    }
}
