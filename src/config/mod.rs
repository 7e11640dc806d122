//! Configuration
//!
//! Layered configuration for a packing run: built-in defaults, the global
//! config file, a `discfit.toml` next to where the tool runs, then `DISCFIT_*`
//! environment variables. CLI flags are applied on top by the caller.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::scan::ScanConfig;
use crate::sorter::SorterConfig;
use crate::types::SINGLE_LAYER_DVD_BYTES;
use serde::{Deserialize, Serialize};

/// Name of the per-directory config file
pub const WORKSPACE_CONFIG_FILE: &str = "discfit.toml";

/// Top-level configuration for a packing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackConfig {
    /// Capacity of a single container in bytes
    #[serde(default = "default_target_size")]
    pub target_size: u64,

    #[serde(default)]
    pub sorter: SorterConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_target_size() -> u64 {
    SINGLE_LAYER_DVD_BYTES
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            target_size: default_target_size(),
            sorter: SorterConfig::default(),
            scan: ScanConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PackConfig {
    /// Reject values the sorter cannot work with.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.target_size == 0 {
            return Err(ApiError::ConfigError(
                "target_size must be greater than 0".to_string(),
            ));
        }
        if self.sorter.granularity == 0 {
            return Err(ApiError::ConfigError(
                "sorter.granularity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self).map_err(|e| ApiError::Serialization(e.to_string()))
    }
}
