//! Chart images for the report.
//!
//! - `series`: chart data derived from the analysis, no drawing
//! - `colormap`: palettes and the diverging correlation scale
//! - `charts`: plotters drawing of the overview grid and the heatmap

mod charts;
pub mod colormap;
pub mod series;

pub use series::{BarSeries, HistogramBins, OverviewData};

use crate::config::ReportConfig;
use crate::dataset::AgriSchema;
use crate::error::{AnalysisError, Result};
use crate::types::CorrelationMatrix;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Writes the chart images into the configured output directory.
pub struct ChartRenderer<'a> {
    config: &'a ReportConfig,
}

impl<'a> ChartRenderer<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    /// Create the output directory if it does not exist.
    pub fn prepare_output_dir(&self) -> Result<()> {
        let dir = &self.config.output_dir;
        fs::create_dir_all(dir).map_err(|e| {
            AnalysisError::Render(format!(
                "cannot create output directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
        debug!("Output directory ready: {}", dir.display());
        Ok(())
    }

    /// Render the 2x2 overview image and return its path.
    pub fn render_overview(&self, schema: &AgriSchema) -> Result<PathBuf> {
        self.prepare_output_dir()?;
        let path = self.config.overview_path();
        let data = OverviewData::from_schema(schema, self.config.histogram_bins);
        charts::draw_overview(&path, self.config.overview_size, &data)?;
        info!("Saved overview chart to {}", path.display());
        Ok(path)
    }

    /// Render the correlation heatmap and return its path.
    pub fn render_heatmap(&self, matrix: &CorrelationMatrix) -> Result<PathBuf> {
        self.prepare_output_dir()?;
        let path = self.config.heatmap_path();
        charts::draw_heatmap(&path, self.config.heatmap_size, matrix)?;
        info!("Saved correlation heatmap to {}", path.display());
        Ok(path)
    }
}
