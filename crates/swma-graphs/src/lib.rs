//! # SWMA Graphs
//!
//! Chart rendering for space weather series.
//!
//! Renderers draw with plotters into an in-memory RGB buffer and return a
//! [`Chart`], which the caller can hand to a display or encode as PNG.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

pub mod bar;
pub mod chart;
pub mod line;
pub mod presets;
pub mod traits;
pub mod utils;

pub use bar::{ProbabilityBarRenderer, ProbabilityBars, TimelineBarRenderer, TimelineBars};
pub use chart::{Chart, ChartStyle};
pub use line::{ClassLabel, EventMarker, LineChartRenderer, LineChartSpec, SeriesLine, Threshold, YScale};
pub use traits::ChartRenderer;
