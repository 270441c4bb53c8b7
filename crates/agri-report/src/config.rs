//! Configuration for a report run.
//!
//! This module provides configuration options using the builder pattern.
//! Almost everything has a fixed default; the input path and whether extra
//! numeric columns join the correlation analysis are the knobs that matter.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default input file, read from the working directory.
pub const DEFAULT_INPUT_PATH: &str = "Agri_data.csv";

/// Configuration for the report generator.
///
/// Use [`ReportConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use agri_report::config::ReportConfig;
///
/// let config = ReportConfig::builder()
///     .input_path("data/farms.csv")
///     .include_extra_numeric(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Path to the CSV file to analyze.
    /// Default: "Agri_data.csv"
    pub input_path: PathBuf,

    /// Directory the chart images are written to (created if absent).
    /// Default: "outputs"
    pub output_dir: PathBuf,

    /// File name of the 2x2 overview chart.
    /// Default: "agricultural_analysis.png"
    pub overview_file_name: String,

    /// File name of the correlation heatmap.
    /// Default: "correlation_matrix.png"
    pub heatmap_file_name: String,

    /// Number of rows shown in the preview table.
    /// Default: 5
    pub preview_rows: usize,

    /// Number of bins in the Soil pH histogram.
    /// Default: 20
    pub histogram_bins: usize,

    /// Pixel size (width, height) of the overview chart.
    /// Default: (1500, 1200)
    pub overview_size: (u32, u32),

    /// Pixel size (width, height) of the heatmap.
    /// Default: (1200, 1000)
    pub heatmap_size: (u32, u32),

    /// Whether numeric columns beyond the six known measurements take part
    /// in the correlation analysis and heatmap.
    /// Default: true
    pub include_extra_numeric: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from("outputs"),
            overview_file_name: "agricultural_analysis.png".to_string(),
            heatmap_file_name: "correlation_matrix.png".to_string(),
            preview_rows: 5,
            histogram_bins: 20,
            overview_size: (1500, 1200),
            heatmap_size: (1200, 1000),
            include_extra_numeric: true,
        }
    }
}

impl ReportConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Full path of the overview chart.
    pub fn overview_path(&self) -> PathBuf {
        self.output_dir.join(&self.overview_file_name)
    }

    /// Full path of the correlation heatmap.
    pub fn heatmap_path(&self) -> PathBuf {
        self.output_dir.join(&self.heatmap_file_name)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.preview_rows == 0 {
            return Err(ConfigValidationError::ZeroValue("preview_rows".to_string()));
        }

        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::ZeroValue(
                "histogram_bins".to_string(),
            ));
        }

        for (field, size) in [
            ("overview_size", self.overview_size),
            ("heatmap_size", self.heatmap_size),
        ] {
            if size.0 == 0 || size.1 == 0 {
                return Err(ConfigValidationError::InvalidImageSize {
                    field: field.to_string(),
                    width: size.0,
                    height: size.1,
                });
            }
        }

        for (field, name) in [
            ("overview_file_name", &self.overview_file_name),
            ("heatmap_file_name", &self.heatmap_file_name),
        ] {
            if name.trim().is_empty() || Path::new(name).file_name().is_none() {
                return Err(ConfigValidationError::InvalidFileName {
                    field: field.to_string(),
                    value: name.clone(),
                });
            }
        }

        if self.overview_file_name == self.heatmap_file_name {
            return Err(ConfigValidationError::InvalidFileName {
                field: "heatmap_file_name".to_string(),
                value: self.heatmap_file_name.clone(),
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for '{0}': must be at least 1")]
    ZeroValue(String),

    #[error("Invalid image size for '{field}': {width}x{height}")]
    InvalidImageSize {
        field: String,
        width: u32,
        height: u32,
    },

    #[error("Invalid file name for '{field}': '{value}'")]
    InvalidFileName { field: String, value: String },
}

impl From<ConfigValidationError> for crate::error::AnalysisError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::AnalysisError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`ReportConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    input_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    overview_file_name: Option<String>,
    heatmap_file_name: Option<String>,
    preview_rows: Option<usize>,
    histogram_bins: Option<usize>,
    overview_size: Option<(u32, u32)>,
    heatmap_size: Option<(u32, u32)>,
    include_extra_numeric: Option<bool>,
}

impl ReportConfigBuilder {
    /// Set the CSV file to analyze.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the directory the chart images are written to.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    pub fn overview_file_name(mut self, name: impl Into<String>) -> Self {
        self.overview_file_name = Some(name.into());
        self
    }

    pub fn heatmap_file_name(mut self, name: impl Into<String>) -> Self {
        self.heatmap_file_name = Some(name.into());
        self
    }

    /// Set how many rows the preview table shows.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Set the number of Soil pH histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    pub fn overview_size(mut self, width: u32, height: u32) -> Self {
        self.overview_size = Some((width, height));
        self
    }

    pub fn heatmap_size(mut self, width: u32, height: u32) -> Self {
        self.heatmap_size = Some((width, height));
        self
    }

    /// Include or exclude numeric columns other than the known measurements
    /// from the correlation analysis and heatmap.
    pub fn include_extra_numeric(mut self, include: bool) -> Self {
        self.include_extra_numeric = Some(include);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ReportConfig` or an error if validation fails.
    pub fn build(self) -> Result<ReportConfig, ConfigValidationError> {
        let defaults = ReportConfig::default();
        let config = ReportConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            overview_file_name: self
                .overview_file_name
                .unwrap_or(defaults.overview_file_name),
            heatmap_file_name: self.heatmap_file_name.unwrap_or(defaults.heatmap_file_name),
            preview_rows: self.preview_rows.unwrap_or(defaults.preview_rows),
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            overview_size: self.overview_size.unwrap_or(defaults.overview_size),
            heatmap_size: self.heatmap_size.unwrap_or(defaults.heatmap_size),
            include_extra_numeric: self
                .include_extra_numeric
                .unwrap_or(defaults.include_extra_numeric),
        };

        config.validate()?;
        Ok(config)
    }
}
