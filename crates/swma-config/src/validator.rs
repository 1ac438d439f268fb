//! Runtime validation of a loaded configuration.

use crate::schema::Config;
use swma_common::{Result, SwmaError};
use url::Url;

/// Smallest and largest accepted chart edge, in pixels.
pub const CHART_EDGE_RANGE: std::ops::RangeInclusive<u32> = 200..=4000;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        for (field, value) in [
            ("feeds.swpc_base_url", &config.feeds.swpc_base_url),
            ("feeds.sdo_base_url", &config.feeds.sdo_base_url),
            ("feeds.soho_base_url", &config.feeds.soho_base_url),
        ] {
            Self::validate_base_url(field, value)?;
        }

        if config.feeds.request_timeout_secs == Some(0) {
            return Err(SwmaError::validation_field(
                "timeout must be at least one second",
                "feeds.request_timeout_secs",
            ));
        }

        for (field, value) in [("graph.width", config.graph.width), ("graph.height", config.graph.height)] {
            if !CHART_EDGE_RANGE.contains(&value) {
                return Err(SwmaError::validation_field(
                    format!(
                        "{value} is outside {}..={}",
                        CHART_EDGE_RANGE.start(),
                        CHART_EDGE_RANGE.end()
                    ),
                    field,
                ));
            }
        }

        if !is_hex_color(&config.graph.background_color) {
            return Err(SwmaError::validation_field(
                format!("'{}' is not a #RRGGBB color", config.graph.background_color),
                "graph.background_color",
            ));
        }

        if config.logging.level.trim().is_empty() {
            return Err(SwmaError::validation_field("level cannot be empty", "logging.level"));
        }

        Ok(())
    }

    fn validate_base_url(field: &str, value: &str) -> Result<()> {
        let url = Url::parse(value)
            .map_err(|e| SwmaError::validation_field(format!("'{value}' is not a URL: {e}"), field))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(SwmaError::validation_field(
                format!("unsupported scheme '{other}'"),
                field,
            )),
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
