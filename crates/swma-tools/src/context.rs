//! The capability boundary between tools and whatever shows their output.

use image::ImageFormat;
use swma_common::{Result, SwmaError};
use swma_config::{Config, FeedsConfig};
use swma_feeds::{FeedClient, FeedUrl, Mode};
use swma_graphs::{Chart, ChartStyle};

/// A user choice a tool may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    /// Feed time window, one of the [`Mode`] names.
    Mode,
    /// Whether to overlay flares on the X-ray chart.
    Flares,
    /// Forecast kind shown on the timeline.
    Timeline,
    /// Whether to request PFSS overlay images.
    Pfss,
}

impl Selection {
    /// Key under which the selection is stored.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Mode => "mode",
            Self::Flares => "flares",
            Self::Timeline => "timeline",
            Self::Pfss => "pfss",
        }
    }
}

/// Everything a tool may do to present its results.
///
/// Implementations decide what "display" means: the CLI writes files and
/// prints text, tests record the calls.
#[cfg_attr(test, mockall::automock)]
pub trait RenderContext: Send {
    /// Shows a rendered chart. `file_name` is the suggested download name.
    fn display_chart(&mut self, chart: &Chart, file_name: &str) -> Result<()>;

    /// Shows an already encoded image.
    fn display_image(&mut self, caption: &str, format: ImageFormat, bytes: &[u8]) -> Result<()>;

    /// Shows a block of markdown-ish text.
    fn display_text(&mut self, text: &str) -> Result<()>;

    /// Returns the raw value of a selection, or `None` to use the default.
    fn read_selection(&self, selection: Selection) -> Option<String>;
}

/// Shared services handed to every tool run.
#[derive(Debug, Clone)]
pub struct ToolEnv {
    /// HTTP client for all feeds.
    pub client: FeedClient,
    /// Service roots.
    pub feeds: FeedsConfig,
    /// Chart size and background.
    pub style: ChartStyle,
}

impl ToolEnv {
    /// Builds the client and chart style from a validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            client: FeedClient::new(&config.feeds)?,
            feeds: config.feeds.clone(),
            style: ChartStyle::from_config(&config.graph)?,
        })
    }

    /// Resolves a SWPC feed path.
    pub fn swpc_url(&self, feed: FeedUrl, mode: Option<Mode>) -> Result<String> {
        feed.resolve(&self.feeds.swpc_base_url, mode)
    }
}

/// The selected [`Mode`], defaulting to one day.
pub fn selected_mode(ctx: &dyn RenderContext) -> Result<Mode> {
    ctx.read_selection(Selection::Mode)
        .map_or_else(|| Ok(Mode::default()), |value| value.parse())
}

/// A yes/no selection, or `default` when unset.
pub fn selected_flag(ctx: &dyn RenderContext, selection: Selection, default: bool) -> Result<bool> {
    let Some(value) = ctx.read_selection(selection) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(SwmaError::validation_field(
            format!("'{other}' is not a yes/no value"),
            selection.key(),
        )),
    }
}
