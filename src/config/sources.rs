//! Config sources: an optional TOML file, then STATUSKIT__ environment overrides.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;
use config::File;
use std::path::Path;
use tracing::warn;

pub const ENV_PREFIX: &str = "STATUSKIT";

/// Add a config file source if it exists.
pub fn add_file(builder: ConfigBuilder<DefaultState>, path: &Path) -> ConfigBuilder<DefaultState> {
    if path.exists() {
        builder.add_source(File::from(path).required(true))
    } else {
        warn!(
            config_path = %path.display(),
            "Configuration file not found, using defaults"
        );
        builder
    }
}

/// Add environment overrides, e.g. `STATUSKIT__LOGGING__LEVEL=debug`.
pub fn add_env(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__"),
    )
}
