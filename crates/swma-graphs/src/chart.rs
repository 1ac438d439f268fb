//! Rendered chart buffers and their PNG encoding.

use crate::utils::parse_hex_color;
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};
use plotters::style::RGBColor;
use std::path::Path;
use swma_common::{Result, SwmaError};
use swma_config::GraphConfig;
use tracing::info;

/// Output size and background of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Background fill.
    pub background: RGBColor,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 825,
            height: 750,
            background: RGBColor(255, 255, 255),
        }
    }
}

impl ChartStyle {
    /// Style from the `[graph]` configuration section.
    pub fn from_config(config: &GraphConfig) -> Result<Self> {
        let background = parse_hex_color(&config.background_color).ok_or_else(|| {
            SwmaError::validation_field(
                format!("'{}' is not a #RRGGBB color", config.background_color),
                "graph.background_color",
            )
        })?;
        Self::new(config.width, config.height).map(|style| Self { background, ..style })
    }

    /// White background at the given size.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SwmaError::graph(format!("invalid chart size {width}x{height}")));
        }
        Ok(Self {
            width,
            height,
            ..Self::default()
        })
    }

    pub(crate) fn buffer(&self) -> Vec<u8> {
        vec![0u8; self.width as usize * self.height as usize * 3]
    }
}

/// An RGB raster produced by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGB8 pixels.
    pub pixels: Vec<u8>,
}

impl Chart {
    /// Wraps a filled buffer.
    pub(crate) fn from_buffer(style: &ChartStyle, pixels: Vec<u8>) -> Self {
        Self {
            width: style.width,
            height: style.height,
            pixels,
        }
    }

    /// Encodes the chart as a PNG byte buffer.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let expected = self.width as usize * self.height as usize * 3;
        if self.pixels.len() != expected {
            return Err(SwmaError::graph(format!(
                "pixel buffer holds {} bytes, {}x{} RGB needs {expected}",
                self.pixels.len(),
                self.width,
                self.height
            )));
        }

        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(&self.pixels, self.width, self.height, ColorType::Rgb8)
            .map_err(|e| SwmaError::graph_with_source("PNG encoding failed", e))?;
        Ok(png)
    }

    /// Writes the chart as PNG to `path`.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let png = self.encode_png()?;
        std::fs::write(path, &png)?;
        info!(path = %path.display(), bytes = png.len(), "Chart written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_from_config() {
        let config = GraphConfig {
            width: 640,
            height: 480,
            background_color: "#102030".to_string(),
        };
        let style = ChartStyle::from_config(&config).unwrap();
        assert_eq!((style.width, style.height), (640, 480));
        assert_eq!(style.background, RGBColor(0x10, 0x20, 0x30));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(ChartStyle::new(0, 100).is_err());
    }

    #[test]
    fn test_png_round_trip_dimensions() {
        let style = ChartStyle::new(40, 30).unwrap();
        let chart = Chart::from_buffer(&style, vec![200u8; 40 * 30 * 3]);

        let png = chart.encode_png().unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }

    #[test]
    fn test_encode_rejects_short_buffer() {
        let chart = Chart {
            width: 10,
            height: 10,
            pixels: vec![0; 12],
        };
        assert!(chart.encode_png().is_err());
    }
}
