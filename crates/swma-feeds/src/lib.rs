//! # SWMA Feeds
//!
//! Fetching and reshaping of the public space weather feeds (NOAA SWPC,
//! NASA SDO, SoHO).
//!
//! Every time-series feed is described by a declarative [`FeedSchema`] and
//! turned into a [`Series`] by one generic [`normalize`] routine. The
//! [`conditions`] module builds the current-conditions summary from the
//! latest-flare, solar wind, IMF and Kp feeds.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod conditions;
pub mod endpoints;
pub mod events;
pub mod fetcher;
pub mod mode;
pub mod normalize;
pub mod schema;

pub use conditions::{CurrentConditions, Imf, KpIndex, LatestFlare, SolarWind};
pub use endpoints::FeedUrl;
pub use events::FlareEvent;
pub use fetcher::FeedClient;
pub use mode::Mode;
pub use normalize::{normalize, Column, Observation, Series, SubSeries};
pub use schema::{Category, ColumnSpec, FeedSchema, FieldRef, Layout, Split};
