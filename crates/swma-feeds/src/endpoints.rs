//! Feed locations relative to their service roots.

use crate::mode::Mode;
use swma_common::{Result, SwmaError};
use url::Url;

const MODE_PLACEHOLDER: &str = "{mode}";

/// A feed path, optionally carrying a `{mode}` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedUrl {
    template: &'static str,
}

impl FeedUrl {
    /// Wraps a path template such as `/json/goes/primary/xrays-{mode}.json`.
    pub const fn new(template: &'static str) -> Self {
        Self { template }
    }

    /// The raw template.
    pub const fn template(&self) -> &'static str {
        self.template
    }

    /// Whether the template needs a [`Mode`].
    pub fn is_parameterized(&self) -> bool {
        self.template.contains(MODE_PLACEHOLDER)
    }

    /// Joins the template onto `base_url`, substituting `mode` if needed.
    ///
    /// Fails when a parameterized template gets no mode or the result is
    /// not a valid URL.
    pub fn resolve(&self, base_url: &str, mode: Option<Mode>) -> Result<String> {
        let path = match (self.is_parameterized(), mode) {
            (true, Some(mode)) => self.template.replace(MODE_PLACEHOLDER, mode.as_str()),
            (true, None) => {
                return Err(SwmaError::validation_field(
                    format!("{} needs a mode", self.template),
                    "mode",
                ))
            }
            (false, _) => self.template.to_string(),
        };

        let url = format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'));
        Url::parse(&url)
            .map_err(|e| SwmaError::validation_field(format!("invalid feed URL '{url}': {e}"), "url"))?;
        Ok(url)
    }
}

/// GOES primary XRS soft X-ray flux, both bands.
pub const XRAYS: FeedUrl = FeedUrl::new("/json/goes/primary/xrays-{mode}.json");
/// GOES primary integral proton flux, five channels.
pub const INTEGRAL_PROTONS: FeedUrl = FeedUrl::new("/json/goes/primary/integral-protons-{mode}.json");
/// Flare list of the last seven days.
pub const XRAY_FLARES_7_DAY: FeedUrl = FeedUrl::new("/json/goes/primary/xray-flares-7-day.json");
/// Most recent flare.
pub const XRAY_FLARES_LATEST: FeedUrl = FeedUrl::new("/json/goes/primary/xray-flares-latest.json");
/// Daily flare and proton event probabilities.
pub const SOLAR_PROBABILITIES: FeedUrl = FeedUrl::new("/json/solar_probabilities.json");
/// DSCOVR/ACE solar wind plasma.
pub const SOLAR_WIND_PLASMA: FeedUrl = FeedUrl::new("/products/solar-wind/plasma-1-day.json");
/// DSCOVR/ACE interplanetary magnetic field.
pub const SOLAR_WIND_MAG: FeedUrl = FeedUrl::new("/products/solar-wind/mag-1-day.json");
/// Planetary K-index.
pub const PLANETARY_K_INDEX: FeedUrl = FeedUrl::new("/products/noaa-planetary-k-index.json");
