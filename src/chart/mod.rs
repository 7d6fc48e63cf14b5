/// Chart generation for weight entries.
///
/// Two forms are derived from the same chronologically sorted entries:
/// - a fixed-size character grid for the terminal (`grid`)
/// - a time-normalized series handed to a renderer (`series`, `render`)
///
/// Both reject an empty entry list with `ChartError::NoData`.

pub mod grid;
pub mod render;
pub mod series;

pub use grid::GridChart;
pub use render::{resolve_output_path, ChartRenderer, HtmlRenderer};
pub use series::{SeriesPoint, TimeSeries, XAxis};

use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::config::DateFormat;
use crate::domain::{Unit, WeightEntry};

/// Errors that can occur while building or writing a chart
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("no weight entries to display")]
    NoData,

    #[error("unsupported output type: {0}")]
    UnsupportedOutput(String),

    #[error("failed to write chart: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize chart data: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Where a chart ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartOutput {
    #[default]
    Terminal,
    Html,
    /// Not rendered natively; produces HTML instead
    Png,
}

impl FromStr for ChartOutput {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "terminal" => Ok(ChartOutput::Terminal),
            "html" => Ok(ChartOutput::Html),
            "png" => Ok(ChartOutput::Png),
            other => Err(ChartError::UnsupportedOutput(other.to_string())),
        }
    }
}

/// Options for chart generation
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub title: String,
    pub output: ChartOutput,
    /// File name for file outputs; generated from the clock when `None`
    pub output_file: Option<String>,
    /// Directory file outputs are written under
    pub output_dir: PathBuf,
    /// Pattern used for dates in labels and listings
    pub date_format: DateFormat,
    /// Unit shown for entries that don't record one
    pub unit: Unit,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "Weight Tracking Chart".to_string(),
            output: ChartOutput::Terminal,
            output_file: None,
            output_dir: PathBuf::from("charts"),
            date_format: DateFormat::default(),
            unit: Unit::Kg,
        }
    }
}

impl ChartOptions {
    /// Default title carrying the entry count
    pub fn title_for(count: usize) -> String {
        if count == 0 {
            "Weight Tracking Chart".to_string()
        } else {
            format!("Weight Tracking Chart ({} entries)", count)
        }
    }
}

/// What a generated chart produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartArtifact {
    /// Text ready to print to a terminal
    Terminal(String),
    /// A file written by the renderer
    File(PathBuf),
}

/// Stable ascending sort by date; undated entries come first
pub fn sort_chronologically(entries: &mut [WeightEntry]) {
    entries.sort_by(|a, b| a.date.cmp(&b.date));
}

/// Generate a chart in the requested output form
pub fn generate_chart(
    mut entries: Vec<WeightEntry>,
    options: &ChartOptions,
) -> Result<ChartArtifact, ChartError> {
    if entries.is_empty() {
        return Err(ChartError::NoData);
    }

    sort_chronologically(&mut entries);

    match options.output {
        ChartOutput::Terminal => {
            let grid = GridChart::build(&entries, options)?;
            Ok(ChartArtifact::Terminal(grid.to_string()))
        }
        ChartOutput::Html | ChartOutput::Png => {
            if options.output == ChartOutput::Png {
                tracing::warn!("PNG output is not supported natively, writing HTML instead");
            }
            let series = TimeSeries::build(&entries, options)?;
            let path = resolve_output_path(&options.output_dir, options.output_file.as_deref())?;
            HtmlRenderer::default().render_to_file(&series, &path)?;
            tracing::info!("Chart written to {}", path.display());
            Ok(ChartArtifact::File(path))
        }
    }
}
