//! Integration tests for Configuration System

use statuskit::config::ConfigLoader;
use statuskit::logging::LoggingConfig;
use tempfile::TempDir;

#[test]
fn test_config_file_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("statuskit.toml");

    std::fs::write(
        &config_file,
        r#"
[logging]
level = "warn"
output = "file"
file = "logs/statuskit.log"
color = false
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.output, "file");
    assert_eq!(
        config.logging.file,
        std::path::PathBuf::from("logs/statuskit.log")
    );
    assert!(!config.logging.color);
    assert_eq!(config.logging.format, LoggingConfig::default().format);
}

#[test]
fn test_malformed_file_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("statuskit.toml");
    std::fs::write(&config_file, "[logging\nlevel = ").unwrap();

    let err = ConfigLoader::load_from_file(&config_file).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}
