use std::path::{Path, PathBuf};

use crate::PROGRAM_NAME;

/// Published manifest name, placed inside each scanned root.
pub const MANIFEST_FILE_NAME: &str = ".everything_index.efu";

/// Suffix appended to the manifest name while a scan is in progress.
/// The temp file is renamed over the published name on success.
pub const MANIFEST_TEMP_SUFFIX: &str = "-scanning";

/// Path the finished manifest is published at for `root`.
pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_FILE_NAME)
}

/// Path the in-progress manifest is written to for `root`.
pub fn temp_path(root: &Path) -> PathBuf {
    root.join(format!("{MANIFEST_FILE_NAME}{MANIFEST_TEMP_SUFFIX}"))
}

/// Default config file location when no config paths are given on the
/// command line.
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.json")
}

fn config_dir() -> PathBuf {
    // dirs::config_dir honors XDG_CONFIG_HOME on Linux.
    dirs::config_dir()
        .map(|p| p.join(PROGRAM_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(PROGRAM_NAME))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
