//! Latest SDO/AIA and SoHO/LASCO images, passed through unchanged.

use super::Tool;
use crate::context::{selected_flag, RenderContext, Selection, ToolEnv};
use async_trait::async_trait;
use swma_common::{Result, SwmaError};
use tracing::{debug, instrument};

/// AIA/HMI channels shown below the composite, in display order.
pub const AIA_CHANNELS: [&str; 8] = ["0171", "0193", "0211", "0304", "0094", "0131", "0335", "1700"];

const AIA_RESOLUTION: u32 = 512;
const AIA_CREDIT: &str = "Images courtesy of NASA/SDO and the AIA, EVE, and HMI science teams.";
const LASCO_DETAILS: &str = "\
Instrument details: the LASCO C2 and C3 white-light coronagraphs image the
corona from 1.5 to 6 and from 3.7 to 30 solar radii.";

/// One remote image and its caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    /// Caption shown with the image.
    pub caption: String,
    /// Path below the service root.
    pub path: String,
}

impl ImageSource {
    fn new(caption: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            path: path.into(),
        }
    }
}

/// The AIA overview: composite, magnetogram, eight channels and continuum.
///
/// `pfss` selects the variants with the field line overlay where SDO
/// publishes them.
pub fn aia_sources(pfss: bool) -> Vec<ImageSource> {
    let suffix = if pfss { "pfss" } else { "" };
    let latest = |name: &str| format!("/assets/img/latest/latest_{AIA_RESOLUTION}_{name}{suffix}.jpg");

    let mut sources = vec![
        ImageSource::new("AIA 211/193/171 composite", "/assets/img/latest/f_211_193_171pfss_1024.jpg"),
        ImageSource::new("HMI magnetogram", latest("HMIB")),
    ];
    sources.extend(
        AIA_CHANNELS
            .iter()
            .map(|channel| ImageSource::new(format!("AIA {channel}"), latest(*channel))),
    );
    sources.push(ImageSource::new(
        "HMI intensitygram",
        format!("/assets/img/latest/latest_{AIA_RESOLUTION}_HMIIC.jpg"),
    ));
    sources
}

/// The two LASCO coronagraph images.
pub fn lasco_sources() -> Vec<ImageSource> {
    ["c2", "c3"]
        .iter()
        .map(|camera| {
            ImageSource::new(
                format!("SOHO/LASCO-{} near-real-time coronagraphic image", camera.to_uppercase()),
                format!("/data/realtime/{camera}/1024/latest.jpg"),
            )
        })
        .collect()
}

async fn show_images(
    env: &ToolEnv,
    ctx: &mut dyn RenderContext,
    base_url: &str,
    sources: &[ImageSource],
) -> Result<()> {
    for source in sources {
        let url = format!("{}{}", base_url.trim_end_matches('/'), source.path);
        let bytes = env.client.fetch_bytes(&url).await?;
        let format = image::guess_format(&bytes)
            .map_err(|e| SwmaError::format_with_source(format!("{url} is not a recognized image"), e))?;
        debug!(%url, ?format, bytes = bytes.len(), "Image fetched");
        ctx.display_image(&source.caption, format, &bytes)?;
    }
    Ok(())
}

/// SDO/AIA overview. Selection: [`Selection::Pfss`] (default off).
#[derive(Debug, Default, Clone, Copy)]
pub struct AiaTool;

#[async_trait]
impl Tool for AiaTool {
    #[instrument(skip_all)]
    async fn run(&self, env: &ToolEnv, ctx: &mut dyn RenderContext) -> Result<()> {
        let pfss = selected_flag(ctx, Selection::Pfss, false)?;
        show_images(env, ctx, &env.feeds.sdo_base_url, &aia_sources(pfss)).await?;
        ctx.display_text(AIA_CREDIT)
    }
}

/// SoHO/LASCO C2 and C3.
#[derive(Debug, Default, Clone, Copy)]
pub struct LascoTool;

#[async_trait]
impl Tool for LascoTool {
    #[instrument(skip_all)]
    async fn run(&self, env: &ToolEnv, ctx: &mut dyn RenderContext) -> Result<()> {
        show_images(env, ctx, &env.feeds.soho_base_url, &lasco_sources()).await?;
        ctx.display_text(LASCO_DETAILS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aia_sources_without_pfss() {
        let sources = aia_sources(false);
        assert_eq!(sources.len(), 11);
        assert_eq!(sources[1].path, "/assets/img/latest/latest_512_HMIB.jpg");
        assert_eq!(sources[2].path, "/assets/img/latest/latest_512_0171.jpg");
        assert_eq!(sources[10].path, "/assets/img/latest/latest_512_HMIIC.jpg");
    }

    #[test]
    fn test_aia_sources_with_pfss() {
        let sources = aia_sources(true);
        assert_eq!(sources[0].path, "/assets/img/latest/f_211_193_171pfss_1024.jpg");
        assert_eq!(sources[9].path, "/assets/img/latest/latest_512_1700pfss.jpg");
        assert!(!sources[10].path.contains("pfss"));
    }

    #[test]
    fn test_lasco_sources() {
        let paths: Vec<_> = lasco_sources().into_iter().map(|s| s.path).collect();
        assert_eq!(paths, ["/data/realtime/c2/1024/latest.jpg", "/data/realtime/c3/1024/latest.jpg"]);
    }
}
