//! Builder seeded with the built-in defaults (lowest precedence layer).

use crate::types::{DEFAULT_GRANULARITY, SINGLE_LAYER_DVD_BYTES};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("target_size", SINGLE_LAYER_DVD_BYTES as i64)?
        .set_default("sorter.granularity", DEFAULT_GRANULARITY as i64)?
        .set_default("sorter.pace_ms", 0i64)?
        .set_default("sorter.allow_exact_fit", false)?
        .set_default("scan.recursive", false)?
        .set_default("scan.follow_symlinks", false)
}
