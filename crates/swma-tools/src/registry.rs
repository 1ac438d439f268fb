//! The ordered table of monitors.

use crate::{
    context::{RenderContext, ToolEnv},
    tools::{AiaTool, ForecastTool, GoesProtonTool, GoesXrayTool, LascoTool, Tool, WelcomeTool},
};
use swma_common::{Result, SwmaError};
use tracing::info;

/// Display name of the landing entry.
pub const WELCOME: &str = "—";

/// One registry row.
pub struct ToolEntry {
    /// Display name.
    pub name: &'static str,
    /// Short ASCII name for command line lookup.
    pub slug: &'static str,
    /// Text shown above the tool output; `None` for the landing entry.
    pub description: Option<&'static str>,
    /// The tool itself.
    pub tool: Box<dyn Tool>,
}

impl std::fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolEntry")
            .field("name", &self.name)
            .field("slug", &self.slug)
            .finish_non_exhaustive()
    }
}

/// Immutable, insertion-ordered list of tools. The first entry is the
/// landing entry.
#[derive(Debug)]
pub struct ToolRegistry {
    entries: Vec<ToolEntry>,
}

impl ToolRegistry {
    /// The six standard entries.
    pub fn standard() -> Self {
        let entry = |name, slug, description, tool: Box<dyn Tool>| ToolEntry {
            name,
            slug,
            description,
            tool,
        };

        Self {
            entries: vec![
                entry(WELCOME, "welcome", None, Box::new(WelcomeTool)),
                entry(
                    "Soft x-ray flux (NOAA-GOES)",
                    "xrays",
                    Some(
                        "Real-time X-ray flux from the GOES satellites, published by NOAA SWPC \
                         every minute. Choose one of four time windows and optionally overlay \
                         the flares of the past week.",
                    ),
                    Box::new(GoesXrayTool),
                ),
                entry(
                    "Proton flux (NOAA-GOES)",
                    "protons",
                    Some(
                        "Real-time integral proton flux from the GOES satellites, published by \
                         NOAA SWPC every minute. Choose one of four time windows.",
                    ),
                    Box::new(GoesProtonTool),
                ),
                entry(
                    "Solar Events Forecast (NOAA)",
                    "forecast",
                    Some(
                        "Daily NOAA SWPC probabilities, from 1% to 99%, of C, M and X class \
                         flares and of a 10 MeV proton event over the next three days.",
                    ),
                    Box::new(ForecastTool),
                ),
                entry(
                    "Extreme Ultraviolet Images (SDO/AIA)",
                    "aia",
                    Some(
                        "Near-real-time images of the chromosphere and corona from the \
                         Atmospheric Imaging Assembly on board the Solar Dynamics Observatory.",
                    ),
                    Box::new(AiaTool),
                ),
                entry(
                    "Coronagraphic Images (SoHO/LASCO)",
                    "lasco",
                    Some(
                        "Near-real-time white-light images of the solar corona from the LASCO \
                         coronagraphs on board SoHO.",
                    ),
                    Box::new(LascoTool),
                ),
            ],
        }
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[ToolEntry] {
        &self.entries
    }

    /// Display names in order, for menus.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// Finds an entry by display name or slug, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&ToolEntry> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name) || entry.slug.eq_ignore_ascii_case(name))
    }

    /// Runs the named tool: heading and description first, then the tool.
    pub async fn run(&self, name: &str, env: &ToolEnv, ctx: &mut dyn RenderContext) -> Result<()> {
        let entry = self.get(name).ok_or_else(|| {
            SwmaError::validation_field(format!("unknown tool '{name}'"), "tool")
        })?;

        if entry.name == WELCOME {
            ctx.display_text("# Welcome to the Space Weather Monitor")?;
        } else {
            ctx.display_text(&format!("# {}", entry.name))?;
            if let Some(description) = entry.description {
                ctx.display_text(description)?;
            }
        }

        info!(tool = entry.slug, "Running tool");
        entry.tool.run(env, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_order() {
        let registry = ToolRegistry::standard();
        let slugs: Vec<_> = registry.entries().iter().map(|e| e.slug).collect();
        assert_eq!(slugs, ["welcome", "xrays", "protons", "forecast", "aia", "lasco"]);
        assert_eq!(registry.names().next(), Some(WELCOME));
        assert!(registry.entries()[0].description.is_none());
    }

    #[test]
    fn test_lookup_by_name_or_slug() {
        let registry = ToolRegistry::standard();
        assert_eq!(registry.get("Proton flux (NOAA-GOES)").map(|e| e.slug), Some("protons"));
        assert_eq!(registry.get("LASCO").map(|e| e.slug), Some("lasco"));
        assert_eq!(registry.get(WELCOME).map(|e| e.slug), Some("welcome"));
        assert!(registry.get("magnetogram").is_none());
    }
}
