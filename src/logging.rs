//! Logging System
//!
//! Structured logging through `tracing`. `init_logging` installs a subscriber
//! for binaries and tests that want one; `emit` records a status as an event
//! at the status's own level.

use crate::error::StatusError;
use crate::level::Level;
use crate::status::Status;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, error, info, warn};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (when output is "file")
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("statuskit.log")
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: default_log_file(),
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), StatusError> {
        parse_format(&self.format)?;
        parse_output(&self.output)?;
        build_filter_from_config(self)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogOutput {
    Stdout,
    Stderr,
    File,
}

/// Initialize the global subscriber
///
/// Priority order (highest to lowest):
/// 1. Environment variables (STATUSKIT_LOG, STATUSKIT_LOG_FORMAT, STATUSKIT_LOG_OUTPUT)
/// 2. Configuration
/// 3. Defaults
///
/// Returns an error instead of panicking when a subscriber is already set.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), StatusError> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;

    let writer = match output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogOutput::File => BoxMakeWriter::new(Mutex::new(open_log_file(config)?)),
    };
    let use_color = config.color && output != LogOutput::File;

    let base_subscriber = Registry::default().with(filter);
    let result = match format {
        LogFormat::Json => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Text => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init(),
    };

    result.map_err(|e| StatusError::ConfigError(format!("Failed to install subscriber: {}", e)))
}

fn open_log_file(config: &LoggingConfig) -> Result<std::fs::File, StatusError> {
    if let Some(parent) = config.file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StatusError::ConfigError(format!("Failed to create log directory: {}", e))
            })?;
        }
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|e| {
            StatusError::ConfigError(format!("Failed to open log file {:?}: {}", config.file, e))
        })
}

/// Build filter from STATUSKIT_LOG, falling back to the config level and modules
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, StatusError> {
    if let Ok(filter) = EnvFilter::try_from_env("STATUSKIT_LOG") {
        return Ok(filter);
    }

    let mut filter = build_filter_from_config(config)?;

    if let Ok(modules_str) = std::env::var("STATUSKIT_LOG_MODULES") {
        for module_spec in modules_str.split(',') {
            if let Some((module, level)) = module_spec.split_once('=') {
                filter = filter.add_directive(parse_directive(module.trim(), level.trim())?);
            }
        }
    }

    Ok(filter)
}

fn build_filter_from_config(config: &LoggingConfig) -> Result<EnvFilter, StatusError> {
    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::try_new(&config.level).map_err(|e| {
        StatusError::ConfigError(format!("Invalid log level {:?}: {}", config.level, e))
    })?;
    for (module, module_level) in &config.modules {
        filter = filter.add_directive(parse_directive(module, module_level)?);
    }
    Ok(filter)
}

fn parse_directive(
    module: &str,
    level: &str,
) -> Result<tracing_subscriber::filter::Directive, StatusError> {
    format!("{}={}", module, level)
        .parse()
        .map_err(|e| StatusError::ConfigError(format!("Invalid log directive: {}", e)))
}

fn determine_format(config: &LoggingConfig) -> Result<LogFormat, StatusError> {
    if let Ok(format) = std::env::var("STATUSKIT_LOG_FORMAT") {
        if let Ok(format) = parse_format(&format) {
            return Ok(format);
        }
    }
    parse_format(&config.format)
}

fn parse_format(format: &str) -> Result<LogFormat, StatusError> {
    match format {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        _ => Err(StatusError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        ))),
    }
}

fn determine_output(config: &LoggingConfig) -> Result<LogOutput, StatusError> {
    if let Ok(output) = std::env::var("STATUSKIT_LOG_OUTPUT") {
        return parse_output(&output);
    }
    parse_output(&config.output)
}

fn parse_output(output: &str) -> Result<LogOutput, StatusError> {
    match output {
        "stdout" => Ok(LogOutput::Stdout),
        "stderr" => Ok(LogOutput::Stderr),
        "file" => Ok(LogOutput::File),
        _ => Err(StatusError::ConfigError(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr' or 'file')",
            output
        ))),
    }
}

/// Record `status` as a tracing event at its level.
///
/// The event level comes from [`Level::as_tracing`]: fatal statuses are
/// logged at ERROR with `fatal = true`, invalid-level statuses are dropped.
pub fn emit(status: &dyn Status) {
    let Some(level) = status.level().as_tracing() else {
        return;
    };

    let mut payload = BTreeMap::new();
    status.walk_payload(&mut |key, value| {
        payload.insert(key.to_string(), value.to_string());
        true
    });
    let code = status.code();
    let frames = status.frames().len();
    let message = status.message();
    let fatal = status.level() == Level::Fatal;

    if level == tracing::Level::ERROR {
        error!(%code, ?payload, frames, fatal, "{}", message);
    } else if level == tracing::Level::WARN {
        warn!(%code, ?payload, frames, "{}", message);
    } else if level == tracing::Level::INFO {
        info!(%code, ?payload, frames, "{}", message);
    } else {
        debug!(%code, ?payload, frames, "{}", message);
    }
}
