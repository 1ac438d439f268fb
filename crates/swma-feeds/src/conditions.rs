//! Current space weather conditions summary.

use crate::{
    endpoints,
    fetcher::FeedClient,
    normalize::{normalize, Series},
    schema,
};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use swma_common::{format_minute, parse_timestamp, Result, SwmaError, Timestamp};
use tracing::instrument;

/// Placeholder shown when no flare is in progress.
pub const NO_FLARE: &str = "None";
/// Time shown when no flare is in progress.
pub const NO_FLARE_TIME: &str = "Now";

/// Most recent X-ray flare with its highlight color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestFlare {
    /// GOES class or [`NO_FLARE`].
    pub class: String,
    /// Time of maximum at minute precision, or [`NO_FLARE_TIME`].
    pub time: String,
    /// Named highlight color, `None` for A-class or no flare.
    pub color: String,
}

/// Highlight color for a GOES flare class.
pub fn flare_color(class: &str) -> &'static str {
    match class.chars().next() {
        Some('B') => "Lime",
        Some('C') => "yellow",
        Some('M') => "orange",
        Some('X') => "red",
        _ => "None",
    }
}

#[derive(Debug, Deserialize)]
struct LatestRecord {
    max_class: Option<String>,
    max_time: Option<String>,
}

impl LatestFlare {
    /// Reads the first record of `xray-flares-latest.json`.
    ///
    /// A null class degrades to `None`/`Now`/`None`. An empty list is a
    /// schema error.
    pub fn from_payload(payload: &Value) -> Result<Self> {
        let records: Vec<LatestRecord> = serde_json::from_value(payload.clone())?;
        let record = records
            .into_iter()
            .next()
            .ok_or_else(|| SwmaError::schema("xray-flares-latest", "max_class", "no records"))?;

        let Some(class) = record.max_class else {
            return Ok(Self {
                class: NO_FLARE.to_string(),
                time: NO_FLARE_TIME.to_string(),
                color: "None".to_string(),
            });
        };

        let time = record
            .max_time
            .as_deref()
            .and_then(parse_timestamp)
            .map(format_minute)
            .ok_or_else(|| SwmaError::schema("xray-flares-latest", "max_time", "missing or unparseable"))?;

        Ok(Self {
            color: flare_color(&class).to_string(),
            class,
            time,
        })
    }
}

/// Latest solar wind plasma moments.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarWind {
    /// Observation time.
    pub time: Timestamp,
    /// Proton density, protons/cm³.
    pub density: Option<f64>,
    /// Bulk speed, km/s.
    pub speed: Option<f64>,
}

impl SolarWind {
    /// Last observation of a normalized plasma series.
    pub fn from_series(series: &Series) -> Result<Self> {
        let density = series.require_column("density")?;
        let speed = series.require_column("speed")?;
        let latest = latest(series)?;
        Ok(Self {
            time: latest.timestamp,
            density: latest.values[density],
            speed: latest.values[speed],
        })
    }
}

/// Latest interplanetary magnetic field.
#[derive(Debug, Clone, PartialEq)]
pub struct Imf {
    /// Observation time.
    pub time: Timestamp,
    /// Total field, nT.
    pub bt: Option<f64>,
    /// North-south component, nT.
    pub bz: Option<f64>,
}

impl Imf {
    /// Last observation of a normalized magnetic field series.
    pub fn from_series(series: &Series) -> Result<Self> {
        let bt = series.require_column("bt")?;
        let bz = series.require_column("bz")?;
        let latest = latest(series)?;
        Ok(Self {
            time: latest.timestamp,
            bt: latest.values[bt],
            bz: latest.values[bz],
        })
    }
}

/// Latest planetary K-index.
#[derive(Debug, Clone, PartialEq)]
pub struct KpIndex {
    /// Start of the three-hour interval.
    pub time: Timestamp,
    /// Kp value.
    pub kp: Option<f64>,
}

impl KpIndex {
    /// Last observation of a normalized Kp series.
    pub fn from_series(series: &Series) -> Result<Self> {
        let kp = series.require_column("kp")?;
        let latest = latest(series)?;
        Ok(Self {
            time: latest.timestamp,
            kp: latest.values[kp],
        })
    }
}

fn latest(series: &Series) -> Result<&crate::normalize::Observation> {
    series
        .primary()?
        .latest()
        .ok_or_else(|| SwmaError::empty_series(series.feed.clone()))
}

/// The conditions panel: flare, solar wind, IMF and Kp.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Latest flare.
    pub flare: LatestFlare,
    /// Solar wind plasma.
    pub solar_wind: SolarWind,
    /// Interplanetary magnetic field.
    pub imf: Imf,
    /// Planetary K-index.
    pub kp: KpIndex,
}

impl CurrentConditions {
    /// Fetches all four feeds from `swpc_base_url`, one after the other.
    #[instrument(skip(client))]
    pub async fn fetch(client: &FeedClient, swpc_base_url: &str) -> Result<Self> {
        let flare_payload = client
            .fetch_json(&endpoints::XRAY_FLARES_LATEST.resolve(swpc_base_url, None)?)
            .await?;
        let flare = LatestFlare::from_payload(&flare_payload)?;

        let plasma = client
            .fetch_series(
                &endpoints::SOLAR_WIND_PLASMA.resolve(swpc_base_url, None)?,
                &schema::solar_wind_plasma(),
            )
            .await?;
        let mag = client
            .fetch_series(
                &endpoints::SOLAR_WIND_MAG.resolve(swpc_base_url, None)?,
                &schema::solar_wind_mag(),
            )
            .await?;
        let kp = client
            .fetch_series(
                &endpoints::PLANETARY_K_INDEX.resolve(swpc_base_url, None)?,
                &schema::planetary_k_index(),
            )
            .await?;

        Ok(Self {
            flare,
            solar_wind: SolarWind::from_series(&plasma)?,
            imf: Imf::from_series(&mag)?,
            kp: KpIndex::from_series(&kp)?,
        })
    }

    /// Builds the summary from already fetched payloads.
    pub fn from_payloads(flare: &Value, plasma: &Value, mag: &Value, kp: &Value) -> Result<Self> {
        Ok(Self {
            flare: LatestFlare::from_payload(flare)?,
            solar_wind: SolarWind::from_series(&normalize(&schema::solar_wind_plasma(), plasma)?)?,
            imf: Imf::from_series(&normalize(&schema::solar_wind_mag(), mag)?)?,
            kp: KpIndex::from_series(&normalize(&schema::planetary_k_index(), kp)?)?,
        })
    }
}

struct Reading(Option<f64>);

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str("n/a"),
        }
    }
}

impl fmt::Display for CurrentConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Space Weather Conditions")?;
        writeln!(
            f,
            "Latest X-ray solar flare: {} @{} [{}]",
            self.flare.class, self.flare.time, self.flare.color
        )?;
        writeln!(f, "Solar Wind: @{}", format_minute(self.solar_wind.time))?;
        writeln!(f, "  Density: {} protons/cm3", Reading(self.solar_wind.density))?;
        writeln!(f, "  Speed: {} km/s", Reading(self.solar_wind.speed))?;
        writeln!(f, "IP Mag. Field: @{}", format_minute(self.imf.time))?;
        writeln!(f, "  Btot: {} nT  Bz: {} nT", Reading(self.imf.bt), Reading(self.imf.bz))?;
        write!(
            f,
            "Planetary K-index: Kp {} @{}",
            Reading(self.kp.kp),
            format_minute(self.kp.time)
        )
    }
}
