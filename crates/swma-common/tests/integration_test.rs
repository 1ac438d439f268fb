//! Integration tests for swma-common crate.

use std::error::Error;
use swma_common::{
    file_stem, format_minute, parse_timestamp, single_line, LogFormat, LoggingConfig, SwmaError,
    Unit,
};

#[test]
fn test_timestamp_round_trip_to_minute_display() {
    let parsed = parse_timestamp("2023-01-01T00:00:00").expect("timestamp should parse");
    assert_eq!(format_minute(parsed), "2023-01-01T00:00");

    let products_style = parse_timestamp("2023-06-15 13:47:00.000").expect("timestamp should parse");
    assert_eq!(format_minute(products_style), "2023-06-15T13:47");
}

#[test]
fn test_error_taxonomy_is_distinguishable() {
    let errors = [
        SwmaError::http_status("https://services.swpc.noaa.gov/x.json", 404),
        SwmaError::format("body is not an array"),
        SwmaError::schema("plasma", "1", "position missing"),
        SwmaError::empty_series("plasma"),
    ];

    assert!(matches!(errors[0], SwmaError::Network { status: Some(404), .. }));
    assert!(matches!(errors[1], SwmaError::Format { .. }));
    assert!(matches!(errors[2], SwmaError::Schema { .. }));
    assert!(matches!(errors[3], SwmaError::EmptySeries { .. }));
    assert!(errors.iter().all(|e| e.source().is_none()));
}

#[test]
fn test_logging_config_shapes() {
    let config = LoggingConfig {
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    };
    assert_eq!(config.format, LogFormat::Compact);
    assert!(config.env_filter().is_ok());
}

#[test]
fn test_display_helpers() {
    assert_eq!(Unit::NanoTesla.to_string(), "nT");
    assert_eq!(file_stem("NOAA GOES SXR flux"), "NOAA_GOES_SXR_flux");
    assert_eq!(single_line("a\n   b"), "a b");
}
