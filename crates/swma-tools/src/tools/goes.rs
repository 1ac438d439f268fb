//! GOES soft X-ray and proton flux charts.

use super::Tool;
use crate::context::{selected_flag, selected_mode, RenderContext, Selection, ToolEnv};
use async_trait::async_trait;
use swma_common::Result;
use swma_feeds::{endpoints, events::parse_flare_events, schema, FlareEvent};
use swma_graphs::{
    presets::{proton_flux_chart, xray_flux_chart},
    ChartRenderer, LineChartRenderer,
};
use tracing::{info, instrument};

/// Suggested file name of the X-ray chart.
pub const XRAY_FILE: &str = "NOAA_GOES_SXR_flux.png";
/// Suggested file name of the proton chart.
pub const PROTON_FILE: &str = "NOAA_GOES_Proton_flux.png";

const XRAY_DETAILS: &str = "\
Instrument details: the XRS measures solar soft X-rays in the 0.1-0.8 nm
(long) and 0.05-0.4 nm (short) passbands. Only the SWPC primary GOES
satellite is plotted.";

const PROTON_DETAILS: &str = "\
Instrument details: integral proton flux in five channels from >=1 MeV to
>=500 MeV. Only the SWPC primary GOES satellite is plotted.";

/// X-ray flux of both bands with an optional flare overlay.
///
/// Selections: [`Selection::Mode`] (default 1-day) and
/// [`Selection::Flares`] (default on).
#[derive(Debug, Default, Clone, Copy)]
pub struct GoesXrayTool;

#[async_trait]
impl Tool for GoesXrayTool {
    #[instrument(skip_all)]
    async fn run(&self, env: &ToolEnv, ctx: &mut dyn RenderContext) -> Result<()> {
        let mode = selected_mode(ctx)?;
        let with_flares = selected_flag(ctx, Selection::Flares, true)?;

        let series = env
            .client
            .fetch_series(&env.swpc_url(endpoints::XRAYS, Some(mode))?, &schema::xrays())
            .await?;
        let flares: Vec<FlareEvent> = if with_flares {
            let payload = env
                .client
                .fetch_json(&env.swpc_url(endpoints::XRAY_FLARES_7_DAY, None)?)
                .await?;
            parse_flare_events(&payload)?
        } else {
            Vec::new()
        };

        let spec = xray_flux_chart(&series, &flares)?;
        info!(%mode, points = series.len(), flares = spec.visible_events().count(), "X-ray chart ready");
        let chart = LineChartRenderer.render(&spec, &env.style)?;
        ctx.display_chart(&chart, XRAY_FILE)?;
        ctx.display_text(XRAY_DETAILS)
    }
}

/// Integral proton flux of all five channels.
///
/// Selection: [`Selection::Mode`] (default 1-day).
#[derive(Debug, Default, Clone, Copy)]
pub struct GoesProtonTool;

#[async_trait]
impl Tool for GoesProtonTool {
    #[instrument(skip_all)]
    async fn run(&self, env: &ToolEnv, ctx: &mut dyn RenderContext) -> Result<()> {
        let mode = selected_mode(ctx)?;
        let series = env
            .client
            .fetch_series(
                &env.swpc_url(endpoints::INTEGRAL_PROTONS, Some(mode))?,
                &schema::integral_protons(),
            )
            .await?;

        let spec = proton_flux_chart(&series)?;
        info!(%mode, points = series.len(), "Proton chart ready");
        let chart = LineChartRenderer.render(&spec, &env.style)?;
        ctx.display_chart(&chart, PROTON_FILE)?;
        ctx.display_text(PROTON_DETAILS)
    }
}
