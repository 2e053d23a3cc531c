//! Error types for the status library.

use crate::code::StatusCode;
use crate::level::Level;
use thiserror::Error;

/// Errors surfaced by statuses, parsing and configuration
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("{level} {code}: {message}")]
    Failed {
        code: StatusCode,
        level: Level,
        message: String,
    },

    #[error("Unknown status code: {0}")]
    UnknownCode(i32),

    #[error("Unknown status code name: {0}")]
    UnknownCodeName(String),

    #[error("Unknown level: {0}")]
    UnknownLevel(String),

    #[error("Dict status already combined, cannot add child {0:?}")]
    AlreadyCombined(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for StatusError {
    fn from(err: config::ConfigError) -> Self {
        StatusError::ConfigError(err.to_string())
    }
}
