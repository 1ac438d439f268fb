//! Flare event lists used as chart overlays.

use serde::Deserialize;
use serde_json::Value;
use swma_common::{parse_timestamp, Result, SwmaError, Timestamp};

/// A flare at its peak.
#[derive(Debug, Clone, PartialEq)]
pub struct FlareEvent {
    /// Time of maximum.
    pub max_time: Timestamp,
    /// GOES class, e.g. `M1.3`.
    pub class: String,
    /// Peak long-band flux in W/m².
    pub peak_flux: f64,
}

#[derive(Debug, Deserialize)]
struct RawFlare {
    max_time: Option<String>,
    max_class: Option<String>,
    max_xrlong: Option<f64>,
}

/// Parses `xray-flares-*.json`.
///
/// Records without a peak time, class or flux are not events and are
/// skipped; a malformed `max_time` is a schema error.
pub fn parse_flare_events(payload: &Value) -> Result<Vec<FlareEvent>> {
    let raw: Vec<RawFlare> = serde_json::from_value(payload.clone())?;

    let mut events = Vec::with_capacity(raw.len());
    for (index, flare) in raw.into_iter().enumerate() {
        let (Some(time), Some(class), Some(peak_flux)) = (flare.max_time, flare.max_class, flare.max_xrlong) else {
            continue;
        };
        let max_time = parse_timestamp(&time).ok_or_else(|| {
            SwmaError::schema("xray-flares", "max_time", format!("record {index}: bad timestamp '{time}'"))
        })?;
        events.push(FlareEvent {
            max_time,
            class,
            peak_flux,
        });
    }
    Ok(events)
}

/// Events whose peak falls inside `[start, end]`.
pub fn within(events: &[FlareEvent], start: Timestamp, end: Timestamp) -> Vec<FlareEvent> {
    events
        .iter()
        .filter(|event| event.max_time >= start && event.max_time <= end)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use swma_common::test_utils::{feed_fixtures, mock_timestamp};

    #[test]
    fn test_parse_seven_day_list() {
        let payload: Value = serde_json::from_str(feed_fixtures::FLARES_7_DAY).unwrap();
        let events = parse_flare_events(&payload).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[1].class, "M1.3");
        assert_eq!(events[1].max_time, mock_timestamp(2023, 1, 1, 0, 1, 0));
    }

    #[test]
    fn test_null_records_are_skipped() {
        let payload: Value = serde_json::from_str(feed_fixtures::FLARE_LATEST_NONE).unwrap();
        assert!(parse_flare_events(&payload).unwrap().is_empty());
    }

    #[test]
    fn test_window_filter() {
        let payload: Value = serde_json::from_str(feed_fixtures::FLARES_7_DAY).unwrap();
        let events = parse_flare_events(&payload).unwrap();
        let inside = within(
            &events,
            mock_timestamp(2023, 1, 1, 0, 0, 0),
            mock_timestamp(2023, 1, 1, 0, 2, 0),
        );
        assert_eq!(inside.len(), 1);
        assert_eq!(inside[0].class, "M1.3");
    }

    #[test]
    fn test_not_a_list_is_format_error() {
        let err = parse_flare_events(&serde_json::json!({"max_class": "X1"})).unwrap_err();
        assert!(matches!(err, SwmaError::Format { .. }));
    }
}
