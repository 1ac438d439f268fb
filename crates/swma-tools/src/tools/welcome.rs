//! Introductory text shown before any monitor is picked.

use super::Tool;
use crate::context::{RenderContext, ToolEnv};
use async_trait::async_trait;
use swma_common::Result;

const INTRO: &str = "\
Space Weather Monitor (SWMA) shows near-real-time space weather data from
public NOAA, NASA and ESA feeds.

Pick a monitor to start.

Available monitors:

- Soft x-ray flux (NOAA-GOES)
- Proton flux (NOAA-GOES)
- Solar event probabilities (NOAA)
- EUV images (SDO/AIA)
- Coronagraphic images (SoHO/LASCO)
";

/// The landing entry: introductory text, no network access.
#[derive(Debug, Default, Clone, Copy)]
pub struct WelcomeTool;

#[async_trait]
impl Tool for WelcomeTool {
    async fn run(&self, _env: &ToolEnv, ctx: &mut dyn RenderContext) -> Result<()> {
        ctx.display_text(INTRO)
    }
}
