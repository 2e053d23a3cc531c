//! Configuration System
//!
//! Layered configuration for the ambient concerns of the library: defaults,
//! then an optional TOML file, then `STATUSKIT__` environment variables.

use crate::error::StatusError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge_policy;
mod sources;

pub use sources::ENV_PREFIX;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StatusConfig {
    pub fn validate(&self) -> Result<(), StatusError> {
        self.logging.validate()
    }
}

/// Loads [`StatusConfig`] from its sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the optional file at `path`, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<StatusConfig, StatusError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        if let Some(path) = path {
            builder = sources::add_file(builder, path);
        }
        builder = sources::add_env(builder);

        let config: StatusConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load defaults and a single file, without environment overrides.
    pub fn load_from_file(path: &Path) -> Result<StatusConfig, StatusError> {
        let builder = sources::add_file(merge_policy::builder_with_defaults()?, path);
        let config: StatusConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
