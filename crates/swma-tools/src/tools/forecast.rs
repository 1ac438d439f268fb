//! NOAA flare and proton event probabilities.

use super::Tool;
use crate::context::{RenderContext, Selection, ToolEnv};
use async_trait::async_trait;
use swma_common::Result;
use swma_feeds::{endpoints, schema};
use swma_graphs::{
    presets::{check_forecast_kind, forecast_probability_bars, forecast_timeline},
    ChartRenderer, ProbabilityBarRenderer, TimelineBarRenderer,
};
use tracing::instrument;

/// Suggested file name of the latest-forecast bars.
pub const PROBABILITY_FILE: &str = "NOAA_GOES_Probability.png";
/// Suggested file name of the timeline.
pub const TIMELINE_FILE: &str = "NOAA_GOES_Probability_Timeline.png";
/// Timeline kind when none is selected.
pub const DEFAULT_TIMELINE: &str = "c_class";

/// Latest probabilities as grouped bars, then one kind over time.
///
/// Selection: [`Selection::Timeline`], one of
/// [`schema::FORECAST_KINDS`] (default `c_class`).
#[derive(Debug, Default, Clone, Copy)]
pub struct ForecastTool;

#[async_trait]
impl Tool for ForecastTool {
    #[instrument(skip_all)]
    async fn run(&self, env: &ToolEnv, ctx: &mut dyn RenderContext) -> Result<()> {
        let kind = ctx
            .read_selection(Selection::Timeline)
            .unwrap_or_else(|| DEFAULT_TIMELINE.to_string());
        check_forecast_kind(&kind)?;

        let series = env
            .client
            .fetch_series(
                &env.swpc_url(endpoints::SOLAR_PROBABILITIES, None)?,
                &schema::solar_probabilities(),
            )
            .await?;

        let bars = forecast_probability_bars(&series)?;
        let chart = ProbabilityBarRenderer.render(&bars, &env.style)?;
        ctx.display_chart(&chart, PROBABILITY_FILE)?;

        let timeline = forecast_timeline(&series, &kind)?;
        let chart = TimelineBarRenderer.render(&timeline, &env.style)?;
        ctx.display_chart(&chart, TIMELINE_FILE)
    }
}
