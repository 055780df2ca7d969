use camino::Utf8PathBuf;

use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Project directories scanned when none are configured.
pub const DEFAULT_ROOTS: &[&str] = &["y", "yave", "editor"];

/// Extensions treated as headers (declaration sources for the symbol index).
pub const DEFAULT_HEADER_EXTENSIONS: &[&str] = &["h", "hpp", "inl"];

/// Extensions treated as translation units (rewrite targets).
pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &["cpp", "cc", "cxx"];

/// Build invocation used as the oracle when none is configured.
pub const DEFAULT_BUILD_COMMAND: &str = "cmake --build build";

/// Text that must appear in the leading comment of every source file.
pub const DEFAULT_LICENSE_MARKER: &str = "Permission is hereby granted";

/// Default log filter expression used by the binary.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    default_log_filter().to_owned()
}

/// Default logging format for the binary.
pub fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Directory the roots and build directory are resolved against.
pub fn default_base_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(".")
}

/// Working directory for the build oracle.
pub fn default_build_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(".")
}

/// Owned build command used where allocation is required.
pub fn default_build_command_string() -> String {
    DEFAULT_BUILD_COMMAND.to_string()
}

/// Owned license marker used where allocation is required.
pub fn default_license_marker_string() -> String {
    DEFAULT_LICENSE_MARKER.to_string()
}

pub(crate) fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
