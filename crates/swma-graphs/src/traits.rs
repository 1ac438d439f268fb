//! Renderer trait shared by every chart type.

use crate::chart::{Chart, ChartStyle};
use swma_common::Result;

/// Something that turns a chart description into pixels.
pub trait ChartRenderer {
    /// Description of what to draw.
    type Input;

    /// Renders `input` at the size and background given by `style`.
    fn render(&self, input: &Self::Input, style: &ChartStyle) -> Result<Chart>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
