//! Default values for every configuration section.

use crate::schema::*;
use std::path::PathBuf;
use swma_common::LogFormat;

/// NOAA Space Weather Prediction Center data services.
pub const DEFAULT_SWPC_BASE_URL: &str = "https://services.swpc.noaa.gov";
/// NASA Solar Dynamics Observatory latest images.
pub const DEFAULT_SDO_BASE_URL: &str = "https://sdo.gsfc.nasa.gov";
/// SoHO near-real-time data.
pub const DEFAULT_SOHO_BASE_URL: &str = "https://sohowww.nascom.nasa.gov";

impl Default for Config {
    fn default() -> Self {
        Self {
            feeds: FeedsConfig::default(),
            graph: GraphConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            swpc_base_url: DEFAULT_SWPC_BASE_URL.to_string(),
            sdo_base_url: DEFAULT_SDO_BASE_URL.to_string(),
            soho_base_url: DEFAULT_SOHO_BASE_URL.to_string(),
            request_timeout_secs: None,
            user_agent: concat!("swma/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for GraphConfig {
    // 5.5 x 5 inches at 150 dpi
    fn default() -> Self {
        Self {
            width: 825,
            height: 750,
            background_color: "#ffffff".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            file: None,
        }
    }
}
