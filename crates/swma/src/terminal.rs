//! Render context for the terminal: files on disk, text on stdout.

use image::ImageFormat;
use std::{collections::HashMap, io::Write, path::PathBuf};
use swma_common::{file_stem, Result};
use swma_graphs::Chart;
use swma_tools::{RenderContext, Selection};
use tracing::info;

/// Writes charts and images into an output directory and prints text.
pub struct CliContext<W: Write + Send> {
    output_dir: PathBuf,
    selections: HashMap<Selection, String>,
    renames: HashMap<String, PathBuf>,
    written: Vec<PathBuf>,
    out: W,
}

impl<W: Write + Send> CliContext<W> {
    /// A context writing files below `output_dir` and text to `out`.
    pub fn new(output_dir: impl Into<PathBuf>, out: W) -> Self {
        Self {
            output_dir: output_dir.into(),
            selections: HashMap::new(),
            renames: HashMap::new(),
            written: Vec::new(),
            out,
        }
    }

    /// Answers `selection` with `value`.
    #[must_use]
    pub fn with_selection(mut self, selection: Selection, value: impl Into<String>) -> Self {
        self.selections.insert(selection, value.into());
        self
    }

    /// Writes the chart a tool names `file_name` to `path` instead.
    #[must_use]
    pub fn with_output(mut self, file_name: &str, path: impl Into<PathBuf>) -> Self {
        self.renames.insert(file_name.to_string(), path.into());
        self
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Gives back the text sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn target(&self, file_name: &str) -> PathBuf {
        self.renames
            .get(file_name)
            .cloned()
            .unwrap_or_else(|| self.output_dir.join(file_name))
    }

    fn record(&mut self, path: PathBuf) -> Result<()> {
        writeln!(self.out, "Saved {}", path.display())?;
        self.written.push(path);
        Ok(())
    }
}

/// File name for an image caption, with the extension of its format.
pub fn image_file_name(caption: &str, format: ImageFormat) -> String {
    let extension = format.extensions_str().first().copied().unwrap_or("img");
    format!("{}.{extension}", file_stem(caption))
}

impl<W: Write + Send> RenderContext for CliContext<W> {
    fn display_chart(&mut self, chart: &Chart, file_name: &str) -> Result<()> {
        let path = self.target(file_name);
        chart.save_png(&path)?;
        self.record(path)
    }

    fn display_image(&mut self, caption: &str, format: ImageFormat, bytes: &[u8]) -> Result<()> {
        let path = self.output_dir.join(image_file_name(caption, format));
        std::fs::write(&path, bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "Image written");
        self.record(path)
    }

    fn display_text(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        writeln!(self.out)?;
        Ok(())
    }

    fn read_selection(&self, selection: Selection) -> Option<String> {
        self.selections.get(&selection).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swma_graphs::ChartStyle;
    use tempfile::TempDir;

    #[test]
    fn test_image_file_names() {
        assert_eq!(
            image_file_name("SOHO/LASCO-C2 near-real-time coronagraphic image", ImageFormat::Jpeg),
            "SOHO_LASCO-C2_near-real-time_coronagraphic_image.jpg"
        );
        assert_eq!(image_file_name("AIA 0171", ImageFormat::Png), "AIA_0171.png");
    }

    #[test]
    fn test_selections_and_text() {
        let mut ctx = CliContext::new(".", Vec::new()).with_selection(Selection::Mode, "7-day");
        assert_eq!(ctx.read_selection(Selection::Mode).as_deref(), Some("7-day"));
        assert_eq!(ctx.read_selection(Selection::Pfss), None);

        ctx.display_text("# Proton flux").unwrap();
        assert_eq!(String::from_utf8(ctx.into_inner()).unwrap(), "# Proton flux\n\n");
    }

    #[test]
    fn test_chart_written_to_renamed_path() {
        let dir = TempDir::new().unwrap();
        let custom = dir.path().join("custom.png");
        let mut ctx = CliContext::new(dir.path(), Vec::new()).with_output("NOAA_GOES_SXR_flux.png", &custom);

        let style = ChartStyle::new(20, 10).unwrap();
        let chart = Chart {
            width: style.width,
            height: style.height,
            pixels: vec![255; 20 * 10 * 3],
        };
        ctx.display_chart(&chart, "NOAA_GOES_SXR_flux.png").unwrap();
        ctx.display_chart(&chart, "other.png").unwrap();

        assert_eq!(ctx.written(), [custom.clone(), dir.path().join("other.png")]);
        assert!(custom.exists());
    }
}
