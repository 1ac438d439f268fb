//! Integration tests for swma-graphs.
//!
//! Fixture payloads go through the normalizer and a renderer, and the
//! resulting PNG is decoded again.

use swma_common::test_utils::{feed_fixtures, init_test_logging};
use swma_feeds::{events::parse_flare_events, normalize, schema, Series};
use swma_graphs::{
    presets::{forecast_probability_bars, forecast_timeline, proton_flux_chart, xray_flux_chart},
    ChartRenderer, ChartStyle, LineChartRenderer, ProbabilityBarRenderer, TimelineBarRenderer,
};
use tempfile::TempDir;

fn load(schema: &swma_feeds::FeedSchema, payload: &str) -> Series {
    normalize(schema, &serde_json::from_str(payload).unwrap()).unwrap()
}

fn small_style() -> ChartStyle {
    ChartStyle::new(480, 360).unwrap()
}

#[test]
fn test_xray_chart_png_round_trip() {
    init_test_logging();

    let series = load(&schema::xrays(), feed_fixtures::XRAYS);
    let flares = parse_flare_events(&serde_json::from_str(feed_fixtures::FLARES_7_DAY).unwrap()).unwrap();
    let spec = xray_flux_chart(&series, &flares).unwrap();
    assert_eq!(spec.visible_events().count(), 1);

    let chart = LineChartRenderer.render(&spec, &small_style()).unwrap();
    let png = chart.encode_png().unwrap();
    assert!(!png.is_empty());

    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (480, 360));
}

#[test]
fn test_proton_chart_saved_to_disk() {
    let series = load(&schema::integral_protons(), feed_fixtures::PROTONS);
    let spec = proton_flux_chart(&series).unwrap();
    let chart = LineChartRenderer.render(&spec, &ChartStyle::default()).unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("NOAA_GOES_Proton_flux.png");
    chart.save_png(&path).unwrap();

    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (825, 750));
}

#[test]
fn test_forecast_charts_render() {
    let series = load(&schema::solar_probabilities(), feed_fixtures::PROBABILITIES);

    let bars = forecast_probability_bars(&series).unwrap();
    let chart = ProbabilityBarRenderer.render(&bars, &small_style()).unwrap();
    assert_eq!(chart.pixels.len(), 480 * 360 * 3);

    let timeline = forecast_timeline(&series, "10mev_protons").unwrap();
    let chart = TimelineBarRenderer.render(&timeline, &small_style()).unwrap();
    let decoded = image::load_from_memory(&chart.encode_png().unwrap()).unwrap();
    assert_eq!(decoded.width(), 480);
}

#[test]
fn test_renderer_names_are_distinct() {
    let names = [
        LineChartRenderer.name(),
        ProbabilityBarRenderer.name(),
        TimelineBarRenderer.name(),
    ];
    assert_eq!(names, ["line", "probability-bars", "timeline-bars"]);
}
