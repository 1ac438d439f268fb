//! Time-series line charts with threshold gridlines and event markers.

use crate::{
    chart::{Chart, ChartStyle},
    traits::ChartRenderer,
    utils::{epoch_seconds, log_tick_label, named_color, time_tick_label},
};
use plotters::{
    coord::{
        ranged1d::{Ranged, ValueFormatter},
        types::RangedCoordf64,
    },
    prelude::*,
    series::DashedLineSeries,
    style::text_anchor::{HPos, Pos, VPos},
};
use swma_common::{Result, SwmaError, Timestamp};
use tracing::debug;

/// Y axis scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YScale {
    /// Linear axis.
    Linear,
    /// Base-10 logarithmic axis.
    #[default]
    Log,
}

/// A horizontal gridline marking a classification boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Threshold {
    /// Y value.
    pub value: f64,
    /// Named or `#RRGGBB` color.
    pub color: String,
}

impl Threshold {
    /// Creates a threshold line.
    pub fn new(value: f64, color: impl Into<String>) -> Self {
        Self {
            value,
            color: color.into(),
        }
    }
}

/// Text placed at the right edge of the plot at a given y value.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassLabel {
    /// Y value.
    pub value: f64,
    /// Label text.
    pub text: String,
}

impl ClassLabel {
    /// Creates a class label.
    pub fn new(value: f64, text: impl Into<String>) -> Self {
        Self {
            value,
            text: text.into(),
        }
    }
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLine {
    /// Legend label.
    pub label: String,
    /// Named or `#RRGGBB` color.
    pub color: String,
    /// Time-ordered points.
    pub points: Vec<(Timestamp, f64)>,
}

/// A discrete event drawn as a dashed vertical line up to its peak.
#[derive(Debug, Clone, PartialEq)]
pub struct EventMarker {
    /// Event time.
    pub time: Timestamp,
    /// Peak value; the label sits at 1.5 times this.
    pub peak: f64,
    /// Label text.
    pub label: String,
}

/// Everything needed to draw one line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartSpec {
    /// Chart title.
    pub title: String,
    /// X axis description.
    pub x_label: String,
    /// Y axis description.
    pub y_label: String,
    /// Fixed y range, low to high.
    pub y_range: (f64, f64),
    /// Y scaling.
    pub y_scale: YScale,
    /// Colored gridlines.
    pub thresholds: Vec<Threshold>,
    /// Right-edge labels.
    pub class_labels: Vec<ClassLabel>,
    /// Plotted lines.
    pub lines: Vec<SeriesLine>,
    /// Event overlays; only those inside `window` are drawn.
    pub events: Vec<EventMarker>,
    /// Displayed time window.
    pub window: (Timestamp, Timestamp),
}

impl LineChartSpec {
    /// Events whose time falls inside the window.
    pub fn visible_events(&self) -> impl Iterator<Item = &EventMarker> {
        let (start, end) = self.window;
        self.events
            .iter()
            .filter(move |event| event.time >= start && event.time <= end)
    }
}

/// Renders [`LineChartSpec`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineChartRenderer;

impl ChartRenderer for LineChartRenderer {
    type Input = LineChartSpec;

    fn render(&self, spec: &LineChartSpec, style: &ChartStyle) -> Result<Chart> {
        let (y_low, y_high) = spec.y_range;
        let valid = y_low.is_finite()
            && y_high.is_finite()
            && y_low < y_high
            && (spec.y_scale == YScale::Linear || y_low > 0.0);
        if !valid {
            return Err(SwmaError::graph(format!("invalid y range {y_low}..{y_high}")));
        }

        let x_start = epoch_seconds(spec.window.0);
        let mut x_end = epoch_seconds(spec.window.1);
        if x_end <= x_start {
            x_end = x_start + 60.0;
        }

        let mut pixels = style.buffer();
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (style.width, style.height)).into_drawing_area();
            root.fill(&style.background)?;

            let mut builder = ChartBuilder::on(&root);
            builder
                .caption(&spec.title, ("sans-serif", 20))
                .margin(15)
                .x_label_area_size(45)
                .y_label_area_size(70)
                .right_y_label_area_size(10);

            match spec.y_scale {
                YScale::Log => {
                    let mut chart =
                        builder.build_cartesian_2d(x_start..x_end, (y_low..y_high).log_scale())?;
                    draw_body(&mut chart, spec, (x_start, x_end), true)?;
                }
                YScale::Linear => {
                    let mut chart = builder.build_cartesian_2d(x_start..x_end, y_low..y_high)?;
                    draw_body(&mut chart, spec, (x_start, x_end), false)?;
                }
            }
            root.present()?;
        }

        debug!(title = %spec.title, lines = spec.lines.len(), "Rendered line chart");
        Ok(Chart::from_buffer(style, pixels))
    }

    fn name(&self) -> &'static str {
        "line"
    }
}

fn draw_body<'a, Y>(
    chart: &mut ChartContext<'a, BitMapBackend<'a>, Cartesian2d<RangedCoordf64, Y>>,
    spec: &LineChartSpec,
    (x_start, x_end): (f64, f64),
    log: bool,
) -> Result<()>
where
    Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    let span = x_end - x_start;
    let (y_low, y_high) = spec.y_range;
    let y_formatter = |v: &f64| if log { log_tick_label(*v) } else { format!("{v}") };

    chart
        .configure_mesh()
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .x_labels(6)
        .x_label_formatter(&|x| time_tick_label(*x, span))
        .y_label_formatter(&y_formatter)
        .light_line_style(RGBColor(235, 235, 235).stroke_width(1))
        .draw()?;

    for threshold in &spec.thresholds {
        let color = named_color(&threshold.color);
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x_start, threshold.value), (x_end, threshold.value)],
            color.stroke_width(1),
        )))?;
    }

    let right_edge = Pos::new(HPos::Right, VPos::Center);
    for label in &spec.class_labels {
        chart.draw_series(std::iter::once(Text::new(
            label.text.clone(),
            (x_end - span * 0.01, label.value),
            ("sans-serif", 15).into_font().color(&BLACK).pos(right_edge),
        )))?;
    }

    for line in &spec.lines {
        let color = named_color(&line.color);
        let points: Vec<(f64, f64)> = line
            .points
            .iter()
            .filter(|(_, value)| value.is_finite() && (!log || *value > 0.0))
            .map(|&(time, value)| (epoch_seconds(time), value))
            .collect();
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(1)))?
            .label(line.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    let centered = Pos::new(HPos::Center, VPos::Center);
    for (index, event) in spec.visible_events().enumerate() {
        let x = epoch_seconds(event.time);
        let top = event.peak.clamp(y_low, y_high);
        let marker = chart.draw_series(DashedLineSeries::new(
            vec![(x, y_low), (x, top)],
            6,
            4,
            BLACK.stroke_width(1),
        ))?;
        if index == 0 {
            marker
                .label("Flare")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(1)));
        }
        chart.draw_series(std::iter::once(Text::new(
            event.label.clone(),
            (x, (event.peak * 1.5).min(y_high)),
            ("sans-serif", 13).into_font().color(&BLACK).pos(centered),
        )))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use swma_common::test_utils::mock_timestamp;

    fn spec() -> LineChartSpec {
        let start = mock_timestamp(2023, 1, 1, 0, 0, 0);
        let end = mock_timestamp(2023, 1, 1, 1, 0, 0);
        LineChartSpec {
            title: "Test".to_string(),
            x_label: "Time [UT]".to_string(),
            y_label: "Flux".to_string(),
            y_range: (1e-9, 1e-3),
            y_scale: YScale::Log,
            thresholds: vec![Threshold::new(1e-6, "green")],
            class_labels: vec![ClassLabel::new(10f64.powf(-5.5), "M")],
            lines: vec![SeriesLine {
                label: "0.1-0.8nm".to_string(),
                color: "red".to_string(),
                points: vec![(start, 1e-6), (end, 2e-6)],
            }],
            events: vec![
                EventMarker {
                    time: mock_timestamp(2023, 1, 1, 0, 30, 0),
                    peak: 1.3e-5,
                    label: "M1.3".to_string(),
                },
                EventMarker {
                    time: mock_timestamp(2022, 12, 31, 10, 0, 0),
                    peak: 3.4e-6,
                    label: "C3.4".to_string(),
                },
            ],
            window: (start, end),
        }
    }

    #[test]
    fn test_visible_events_are_inside_window() {
        let labels: Vec<_> = spec().visible_events().map(|e| e.label.clone()).collect();
        assert_eq!(labels, ["M1.3"]);
    }

    #[test]
    fn test_events_on_window_edges_are_visible() {
        let mut spec = spec();
        let (start, end) = spec.window;
        let marker = |time, label: &str| EventMarker {
            time,
            peak: 1e-5,
            label: label.to_string(),
        };
        spec.events = vec![
            marker(start, "at-start"),
            marker(end, "at-end"),
            marker(start - chrono::Duration::seconds(1), "before-start"),
        ];

        let labels: Vec<_> = spec.visible_events().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["at-start", "at-end"]);
    }

    #[test]
    fn test_render_log_chart_size() {
        let style = ChartStyle::new(400, 300).unwrap();
        let chart = LineChartRenderer.render(&spec(), &style).unwrap();
        assert_eq!((chart.width, chart.height), (400, 300));
        assert_eq!(chart.pixels.len(), 400 * 300 * 3);
        assert!(chart.pixels.iter().any(|&p| p != 255));
    }

    #[test]
    fn test_render_linear_chart() {
        let mut spec = spec();
        spec.y_scale = YScale::Linear;
        spec.y_range = (0.0, 5e-6);
        spec.events.clear();
        let chart = LineChartRenderer.render(&spec, &ChartStyle::new(300, 200).unwrap()).unwrap();
        assert_eq!(chart.width, 300);
    }

    #[test]
    fn test_invalid_log_range() {
        let mut spec = spec();
        spec.y_range = (0.0, 1.0);
        assert!(LineChartRenderer.render(&spec, &ChartStyle::default()).is_err());
    }
}
