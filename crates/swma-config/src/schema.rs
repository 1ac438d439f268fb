//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};
use swma_common::{LogFormat, LoggingConfig, SwmaError};

/// Main configuration structure for SWMA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upstream feed endpoints.
    pub feeds: FeedsConfig,
    /// Chart output settings.
    pub graph: GraphConfig,
    /// Where rendered files go.
    pub output: OutputConfig,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Upstream feed endpoints and HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    /// NOAA SWPC services root.
    pub swpc_base_url: String,
    /// NASA SDO image root.
    pub sdo_base_url: String,
    /// SoHO/nascom image root.
    pub soho_base_url: String,
    /// Request timeout in seconds; unset means wait indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl FeedsConfig {
    /// Request timeout as a [`Duration`], if configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Chart dimensions and background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// Background color, `#RRGGBB`.
    pub background_color: String,
}

/// Output location for charts and images written by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory rendered files are written to.
    pub directory: PathBuf,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `swma_feeds=debug`.
    pub level: String,
    /// Line format.
    pub format: LogFormat,
    /// Optional log file; stderr when unset.
    pub file: Option<String>,
}

impl LoggingSettings {
    /// Converts to the logging initialiser's configuration.
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            format: self.format,
            file_path: self.file.clone(),
            ..LoggingConfig::default()
        }
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SwmaError> {
        crate::validator::ConfigValidator::validate(self)
    }
}
