//! Color and time-axis helpers.

use chrono::DateTime;
use plotters::style::RGBColor;
use swma_common::Timestamp;

/// Parses `#RRGGBB`.
pub fn parse_hex_color(value: &str) -> Option<RGBColor> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Resolves the named colors used by the feed catalog, or `#RRGGBB`.
///
/// Unknown names fall back to black.
pub fn named_color(name: &str) -> RGBColor {
    match name.to_ascii_lowercase().as_str() {
        "red" => RGBColor(255, 0, 0),
        "blue" => RGBColor(0, 0, 255),
        "green" => RGBColor(0, 128, 0),
        "lime" => RGBColor(0, 255, 0),
        "yellow" => RGBColor(255, 255, 0),
        "orange" => RGBColor(255, 165, 0),
        "white" => RGBColor(255, 255, 255),
        "gray" | "grey" => RGBColor(128, 128, 128),
        "lightgreen" => RGBColor(144, 238, 144),
        "lightblue" => RGBColor(173, 216, 230),
        "lightcoral" => RGBColor(240, 128, 128),
        other => parse_hex_color(other).unwrap_or(RGBColor(0, 0, 0)),
    }
}

/// Seconds since the Unix epoch, the x coordinate of time charts.
#[allow(clippy::cast_precision_loss)]
pub fn epoch_seconds(timestamp: Timestamp) -> f64 {
    timestamp.and_utc().timestamp() as f64
}

/// Tick label for an epoch-seconds coordinate.
///
/// Spans longer than two days drop the time of day.
#[allow(clippy::cast_possible_truncation)]
pub fn time_tick_label(seconds: f64, span_seconds: f64) -> String {
    let Some(time) = DateTime::from_timestamp(seconds.round() as i64, 0) else {
        return String::new();
    };
    if span_seconds > 2.0 * 86_400.0 {
        time.format("%b-%d").to_string()
    } else {
        time.format("%d %H:%M").to_string()
    }
}

/// Compact scientific label for log axes, e.g. `1e-6`.
pub fn log_tick_label(value: f64) -> String {
    format!("{value:.0e}")
}
