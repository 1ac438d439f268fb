//! Time-range granularity of the mode-parameterized GOES feeds.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use swma_common::SwmaError;

/// Time span covered by a GOES feed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Last six hours
    #[serde(rename = "6-hour")]
    SixHour,
    /// Last day
    #[default]
    #[serde(rename = "1-day")]
    OneDay,
    /// Last three days
    #[serde(rename = "3-day")]
    ThreeDay,
    /// Last seven days
    #[serde(rename = "7-day")]
    SevenDay,
}

impl Mode {
    /// Selection order shown to users.
    pub const ALL: [Self; 4] = [Self::OneDay, Self::ThreeDay, Self::SevenDay, Self::SixHour];

    /// The token substituted into feed URLs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SixHour => "6-hour",
            Self::OneDay => "1-day",
            Self::ThreeDay => "3-day",
            Self::SevenDay => "7-day",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = SwmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s.trim())
            .ok_or_else(|| {
                SwmaError::validation_field(
                    format!("unknown mode '{s}', expected one of 6-hour, 1-day, 3-day, 7-day"),
                    "mode",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_modes() {
        for mode in Mode::ALL {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_default_is_one_day() {
        assert_eq!(Mode::default(), Mode::OneDay);
    }

    #[test]
    fn test_unknown_mode() {
        assert!("2-day".parse::<Mode>().is_err());
    }
}
