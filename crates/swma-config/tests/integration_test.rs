//! Integration tests for swma-config crate.

use std::path::Path;
use swma_common::{test_utils::create_temp_dir, LogFormat, SwmaError};
use swma_config::{Config, ConfigError, ConfigLoader};

#[test]
fn test_load_explicit_file() {
    let dir = create_temp_dir();
    let path = dir.path().join("swma.toml");
    std::fs::write(
        &path,
        r##"
[feeds]
swpc_base_url = "http://localhost:8080"
request_timeout_secs = 20

[graph]
width = 1000
background_color = "#202020"

[logging]
level = "swma_feeds=debug"
format = "json"
"##,
    )
    .unwrap();

    let config = ConfigLoader::load(Some(&path)).unwrap();
    assert_eq!(config.feeds.swpc_base_url, "http://localhost:8080");
    assert_eq!(config.feeds.request_timeout_secs, Some(20));
    assert_eq!(config.graph.width, 1000);
    assert_eq!(config.graph.height, Config::default().graph.height);
    assert_eq!(config.logging.format, LogFormat::Json);

    let logging = config.logging.to_logging_config();
    assert_eq!(logging.level, "swma_feeds=debug");
    assert_eq!(logging.format, LogFormat::Json);
}

#[test]
fn test_missing_explicit_file_is_config_error() {
    let err = ConfigLoader::load(Some(Path::new("/nonexistent/swma.toml"))).unwrap_err();
    assert!(matches!(err, SwmaError::Config { .. }));
}

#[test]
fn test_malformed_file_reports_parse_error() {
    let dir = create_temp_dir();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[graph\nwidth = ").unwrap();

    let err = ConfigLoader::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_invalid_values_fail_load() {
    let dir = create_temp_dir();
    let path = dir.path().join("swma.toml");
    std::fs::write(&path, "[graph]\nwidth = 50\n").unwrap();

    let err = ConfigLoader::load(Some(&path)).unwrap_err();
    assert!(matches!(err, SwmaError::Validation { .. }));
}

#[test]
fn test_default_round_trips_through_toml() {
    let config = Config::default();
    let text = toml::to_string(&config).unwrap();
    assert_eq!(ConfigLoader::from_toml(&text).unwrap(), config);
}
