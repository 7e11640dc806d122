//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::PackConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file, `base_dir`'s `discfit.toml`
    /// and the environment.
    pub fn load(base_dir: &Path) -> Result<PackConfig, ApiError> {
        let config = MergeService::load(base_dir)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<PackConfig, ApiError> {
        if !path.is_file() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config = MergeService::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }
}
