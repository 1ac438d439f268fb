//! Probability bar charts for the NOAA forecast.

use crate::{
    chart::{Chart, ChartStyle},
    traits::ChartRenderer,
    utils::named_color,
};
use plotters::{
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use swma_common::{Result, SwmaError, Timestamp};
use tracing::debug;

/// Legend labels of the three forecast horizons.
pub const HORIZONS: [&str; 3] = ["1-day", "2-days", "3-days"];
const HORIZON_COLORS: [&str; 3] = ["lightgreen", "lightblue", "lightcoral"];

/// Horizontal grouped bars: one group per event kind, one bar per horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityBars {
    /// Chart title.
    pub title: String,
    /// `(group label, [1-day, 2-day, 3-day])` in percent, top to bottom.
    pub groups: Vec<(String, [f64; 3])>,
}

/// Vertical bars of one forecast kind over the issue dates.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineBars {
    /// Chart title.
    pub title: String,
    /// Legend label.
    pub label: String,
    /// `(date, percent)` in time order.
    pub points: Vec<(Timestamp, f64)>,
}

/// Renders [`ProbabilityBars`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ProbabilityBarRenderer;

impl ChartRenderer for ProbabilityBarRenderer {
    type Input = ProbabilityBars;

    fn render(&self, bars: &ProbabilityBars, style: &ChartStyle) -> Result<Chart> {
        if bars.groups.is_empty() {
            return Err(SwmaError::empty_series("forecast probabilities"));
        }

        // Each group takes three rows plus a separator row.
        let rows = bars.groups.len() as f64 * 4.0;
        let group_row = |group: usize| rows - (group as f64 * 4.0);
        let bar_center = |group: usize, horizon: usize| group_row(group) - 1.0 - horizon as f64;

        let mut pixels = style.buffer();
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (style.width, style.height)).into_drawing_area();
            root.fill(&style.background)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&bars.title, ("sans-serif", 20))
                .margin(15)
                .x_label_area_size(45)
                .y_label_area_size(80)
                .build_cartesian_2d(0.0..100.0, 0.0..rows)?;

            let names: Vec<&str> = bars.groups.iter().map(|(name, _)| name.as_str()).collect();
            chart
                .configure_mesh()
                .disable_y_mesh()
                .x_desc("Probability %")
                .y_labels(bars.groups.len() * 4 + 1)
                .y_label_formatter(&|y| {
                    names
                        .iter()
                        .enumerate()
                        .find(|(group, _)| (bar_center(*group, 1) - y).abs() < 0.25)
                        .map(|(_, name)| (*name).to_string())
                        .unwrap_or_default()
                })
                .draw()?;

            for group in 1..bars.groups.len() {
                let y = group_row(group);
                chart.draw_series(std::iter::once(PathElement::new(vec![(0.0, y), (100.0, y)], BLACK.stroke_width(1))))?;
            }

            let label_style = ("sans-serif", 13).into_font().color(&BLACK);
            for (horizon, legend) in HORIZONS.iter().enumerate() {
                let color = named_color(HORIZON_COLORS[horizon]);
                chart
                    .draw_series(bars.groups.iter().enumerate().map(|(group, (_, values))| {
                        let y = bar_center(group, horizon);
                        Rectangle::new([(0.0, y - 0.4), (values[horizon].clamp(0.0, 100.0), y + 0.4)], color.filled())
                    }))?
                    .label(*legend)
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 14, y + 5)], color.filled()));

                chart.draw_series(bars.groups.iter().enumerate().map(|(group, (_, values))| {
                    let value = values[horizon].clamp(0.0, 100.0);
                    Text::new(
                        format!("{value:.0} %"),
                        (value + 1.0, bar_center(group, horizon)),
                        label_style.pos(Pos::new(HPos::Left, VPos::Center)),
                    )
                }))?;
            }

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
            root.present()?;
        }

        debug!(groups = bars.groups.len(), "Rendered probability bars");
        Ok(Chart::from_buffer(style, pixels))
    }

    fn name(&self) -> &'static str {
        "probability-bars"
    }
}

/// Renders [`TimelineBars`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TimelineBarRenderer;

impl ChartRenderer for TimelineBarRenderer {
    type Input = TimelineBars;

    fn render(&self, timeline: &TimelineBars, style: &ChartStyle) -> Result<Chart> {
        if timeline.points.is_empty() {
            return Err(SwmaError::empty_series(format!("{} timeline", timeline.label)));
        }

        let count = timeline.points.len();
        let color = named_color("lightblue");
        let mut pixels = style.buffer();
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (style.width, style.height)).into_drawing_area();
            root.fill(&style.background)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&timeline.title, ("sans-serif", 20))
                .margin(15)
                .x_label_area_size(45)
                .y_label_area_size(60)
                .build_cartesian_2d(-0.5..(count as f64 - 0.5), 0.0..100.0)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .y_desc("Probability %")
                .x_labels(count.min(10))
                .x_label_formatter(&|x| {
                    let index = x.round();
                    if (x - index).abs() > 0.01 || index < 0.0 {
                        return String::new();
                    }
                    timeline
                        .points
                        .get(index as usize)
                        .map(|(date, _)| date.format("%Y-%b-%d").to_string())
                        .unwrap_or_default()
                })
                .draw()?;

            chart
                .draw_series(timeline.points.iter().enumerate().map(|(index, (_, value))| {
                    let x = index as f64;
                    Rectangle::new([(x - 0.4, 0.0), (x + 0.4, value.clamp(0.0, 100.0))], color.filled())
                }))?
                .label(timeline.label.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 14, y + 5)], color.filled()));

            let above = ("sans-serif", 13)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Bottom));
            chart.draw_series(timeline.points.iter().enumerate().map(|(index, (_, value))| {
                Text::new(
                    format!("{value:.0}%"),
                    (index as f64, value.clamp(0.0, 100.0) + 1.0),
                    above.clone(),
                )
            }))?;

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
            root.present()?;
        }

        debug!(label = %timeline.label, bars = count, "Rendered timeline bars");
        Ok(Chart::from_buffer(style, pixels))
    }

    fn name(&self) -> &'static str {
        "timeline-bars"
    }
}
