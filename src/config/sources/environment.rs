//! Environment variable source: DISCFIT_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses DISCFIT_ prefix and __ as separator for nested keys,
/// e.g. `DISCFIT_SORTER__GRANULARITY=1048576` or `DISCFIT_TARGET_SIZE=2048`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("DISCFIT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
