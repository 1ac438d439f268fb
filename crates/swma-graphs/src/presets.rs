//! Chart layouts for the NOAA GOES and forecast feeds.
//!
//! Each builder takes a normalized [`Series`] and returns the input of one
//! renderer. The x window comes from the anchor sub-series, so an empty
//! anchor fails with [`SwmaError::EmptySeries`] before anything is drawn.

use crate::{
    bar::{ProbabilityBars, TimelineBars},
    line::{ClassLabel, EventMarker, LineChartSpec, SeriesLine, Threshold, YScale},
};
use swma_common::{Result, SwmaError};
use swma_feeds::{
    schema::{FORECAST_KINDS, PROTON_CHANNELS, XRAY_LONG},
    FlareEvent, Series,
};

/// Title of the soft X-ray chart.
pub const XRAY_TITLE: &str = "NOAA - GOES Soft X-Ray Flux (1-minute average)";
/// Title of the proton chart.
pub const PROTON_TITLE: &str = "NOAA - GOES Proton Flux (1-minute average)";
/// Title of the forecast bar chart.
pub const FORECAST_TITLE: &str = "NOAA - Daily Solar Probabilities";

const TIME_AXIS: &str = "Time [UT]";
const SCALE_COLORS: [&str; 5] = ["blue", "green", "yellow", "orange", "red"];
const FLARE_CLASSES: [&str; 5] = ["A", "B", "C", "M", "X"];
const FORECAST_GROUPS: [&str; 4] = ["C-class", "M-class", "X-class", "Protons"];

/// Soft X-ray flux of both bands, anchored on the long band.
///
/// `flares` are overlaid as event markers; those outside the window are
/// kept on the chart description but not drawn.
pub fn xray_flux_chart(series: &Series, flares: &[FlareEvent]) -> Result<LineChartSpec> {
    let flux = series.require_column("flux")?;
    let anchor = series
        .category(XRAY_LONG)
        .ok_or_else(|| SwmaError::empty_series(format!("{} band {XRAY_LONG}", series.feed)))?;
    let window = anchor.window()?;

    let thresholds = SCALE_COLORS
        .iter()
        .zip(-7..=-3)
        .map(|(color, exponent)| Threshold::new(10f64.powi(exponent), *color))
        .collect();
    let class_labels = FLARE_CLASSES
        .iter()
        .zip(0_i32..)
        .map(|(class, step)| ClassLabel::new(10f64.powf(-7.5 + f64::from(step)), *class))
        .collect();
    let events = flares
        .iter()
        .map(|flare| EventMarker {
            time: flare.max_time,
            peak: flare.peak_flux,
            label: flare.class.clone(),
        })
        .collect();

    Ok(LineChartSpec {
        title: XRAY_TITLE.to_string(),
        x_label: TIME_AXIS.to_string(),
        y_label: "Flux [W/m²]".to_string(),
        y_range: (1e-9, 1e-3),
        y_scale: YScale::Log,
        thresholds,
        class_labels,
        lines: lines(series, flux),
        events,
        window,
    })
}

/// Integral proton flux of all channels, anchored on the lowest channel.
pub fn proton_flux_chart(series: &Series) -> Result<LineChartSpec> {
    let flux = series.require_column("flux")?;
    let anchor = series.category(PROTON_CHANNELS[0]).ok_or_else(|| {
        SwmaError::empty_series(format!("{} channel {}", series.feed, PROTON_CHANNELS[0]))
    })?;
    let window = anchor.window()?;

    let thresholds = SCALE_COLORS
        .iter()
        .zip(0..=4)
        .map(|(color, exponent)| Threshold::new(10f64.powi(exponent), *color))
        .collect();

    Ok(LineChartSpec {
        title: PROTON_TITLE.to_string(),
        x_label: TIME_AXIS.to_string(),
        y_label: "Flux [pfu]".to_string(),
        y_range: (1e-2, 1e4),
        y_scale: YScale::Log,
        thresholds,
        class_labels: vec![ClassLabel::new(10.0, "SEP")],
        lines: lines(series, flux),
        events: Vec::new(),
        window,
    })
}

/// Latest forecast as grouped bars: C, M and X class flares and protons.
pub fn forecast_probability_bars(series: &Series) -> Result<ProbabilityBars> {
    let latest = series
        .primary()?
        .latest()
        .ok_or_else(|| SwmaError::empty_series(series.feed.clone()))?;

    let groups = FORECAST_KINDS
        .iter()
        .zip(FORECAST_GROUPS)
        .map(|(kind, group)| {
            let mut values = [0.0; 3];
            for (day, value) in values.iter_mut().enumerate() {
                let column = series.require_column(&format!("{kind}_{}_day", day + 1))?;
                *value = latest.values.get(column).copied().flatten().ok_or_else(|| {
                    SwmaError::schema(&series.feed, format!("{kind}_{}_day", day + 1), "missing value")
                })?;
            }
            Ok((group.to_string(), values))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ProbabilityBars {
        title: FORECAST_TITLE.to_string(),
        groups,
    })
}

/// Rejects a timeline kind outside [`FORECAST_KINDS`].
pub fn check_forecast_kind(kind: &str) -> Result<()> {
    if FORECAST_KINDS.contains(&kind) {
        return Ok(());
    }
    Err(SwmaError::validation_field(
        format!("unknown forecast kind '{kind}', expected one of {}", FORECAST_KINDS.join(", ")),
        "timeline",
    ))
}

/// One-day probability of `kind` over every issue date in the feed.
pub fn forecast_timeline(series: &Series, kind: &str) -> Result<TimelineBars> {
    check_forecast_kind(kind)?;
    let column = series.require_column(&format!("{kind}_1_day"))?;
    let points: Vec<_> = series.primary()?.points(column).collect();
    if points.is_empty() {
        return Err(SwmaError::empty_series(format!("{kind} forecast")));
    }

    Ok(TimelineBars {
        title: format!("NOAA - {kind} 1-day probability"),
        label: kind.to_string(),
        points,
    })
}

fn lines(series: &Series, column: usize) -> Vec<SeriesLine> {
    series
        .subseries
        .iter()
        .map(|sub| SeriesLine {
            label: sub.label.clone(),
            color: sub.color.clone().unwrap_or_else(|| "black".to_string()),
            points: sub.points(column).collect(),
        })
        .collect()
}
