//! Common type definitions shared by feeds, graphs and tools.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timezone-naive point in time used as the ordering key of every series.
pub type Timestamp = NaiveDateTime;

/// Physical unit attached to a value column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Irradiance, W/m²
    WattsPerSquareMeter,
    /// Particle flux, particles·cm⁻²·s⁻¹·sr⁻¹ (pfu)
    ParticleFlux,
    /// Number density, protons/cm³
    ProtonDensity,
    /// Speed, km/s
    KilometersPerSecond,
    /// Temperature, K
    Kelvin,
    /// Magnetic field, nT
    NanoTesla,
    /// Probability, %
    Percent,
    /// Angle, degrees
    Degrees,
    /// No unit (indices such as Kp)
    Dimensionless,
}

impl Unit {
    /// Short symbol for axis labels and summaries.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::WattsPerSquareMeter => "W/m²",
            Self::ParticleFlux => "pfu",
            Self::ProtonDensity => "protons/cm3",
            Self::KilometersPerSecond => "km/s",
            Self::Kelvin => "K",
            Self::NanoTesla => "nT",
            Self::Percent => "%",
            Self::Degrees => "deg",
            Self::Dimensionless => "",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses the ISO-8601-like timestamps found in SWPC feeds.
///
/// Accepts `T` or space separators, optional seconds and fractions, a
/// trailing `Z`, RFC 3339 offsets (converted to UTC and dropped) and
/// bare dates (midnight).
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let trimmed = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(with_offset.naive_utc());
    }

    let text = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Minute-precision display form, e.g. `2023-01-01T00:00`.
pub fn format_minute(timestamp: Timestamp) -> String {
    timestamp.format("%Y-%m-%dT%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_parse_feed_timestamp_shapes() {
        let expected = ts(2023, 1, 1, 12, 30, 0);
        assert_eq!(parse_timestamp("2023-01-01T12:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2023-01-01T12:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-01-01 12:30:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2023-01-01T12:30"), Some(expected));
        assert_eq!(parse_timestamp("2023-01-01T12:30:00+00:00"), Some(expected));
    }

    #[test]
    fn test_parse_bare_date_is_midnight() {
        assert_eq!(parse_timestamp("2023-03-05"), Some(ts(2023, 3, 5, 0, 0, 0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp("time_tag"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2023-13-01T00:00:00"), None);
    }

    #[test]
    fn test_format_minute() {
        assert_eq!(format_minute(ts(2023, 1, 1, 0, 0, 59)), "2023-01-01T00:00");
    }

    #[test]
    fn test_unit_symbols() {
        assert_eq!(Unit::WattsPerSquareMeter.to_string(), "W/m²");
        assert_eq!(Unit::ProtonDensity.symbol(), "protons/cm3");
        assert_eq!(Unit::Dimensionless.symbol(), "");
    }
}
