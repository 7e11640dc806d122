//! XDG Base Directory utilities for locating the global config file.

use std::path::PathBuf;

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise the platform config directory.
pub fn config_home() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Some(PathBuf::from(xdg_config_home));
        }
    }

    directories::BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path of the global config file (`<config home>/discfit/config.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    config_home().map(|home| home.join("discfit").join("config.toml"))
}
