//! Agricultural Report Generator Library
//!
//! Descriptive statistics, grouped aggregations, correlation rankings and
//! charts for a farm-level agricultural dataset, built with Rust and Polars.
//!
//! # Overview
//!
//! A run is a fixed, strictly sequential report:
//!
//! - **Loading**: CSV read through polars, columns classified as numeric or
//!   categorical, required columns validated once ([`AgriSchema`])
//! - **Summary**: shape, preview, column info, descriptive statistics and
//!   categorical value counts
//! - **Crop performance / Sustainability**: fixed grouped tables
//! - **Correlations**: Pearson matrix over the numeric columns and rankings
//!   against Yield and Profit
//! - **Visualizations**: a 2x2 overview image and a correlation heatmap
//! - **Complete**: key findings computed from the data
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use agri_report::{AgriculturalAnalyzer, ReportConfig};
//!
//! let config = ReportConfig::builder()
//!     .input_path("Agri_data.csv")
//!     .output_dir("outputs")
//!     .build()?;
//!
//! let analyzer = AgriculturalAnalyzer::load(config)?;
//! let charts = analyzer.run_full_analysis(&mut std::io::stdout())?;
//! println!("Heatmap written to {}", charts.heatmap.display());
//! ```
//!
//! # Undefined statistics
//!
//! Statistics that cannot be computed (the std of a single value, the
//! correlation with a constant column) are `None` and print as `undefined`.
//! They never become 0 or NaN.

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;
pub mod visualization;

// Re-export main types for convenience
pub use analysis::{CorrelationAnalyzer, GroupSpec, GroupedAggregator};
pub use config::{ConfigValidationError, ReportConfig, ReportConfigBuilder, DEFAULT_INPUT_PATH};
pub use dataset::{AgriSchema, CategoricalField, Dataset, NumericField};
pub use error::{AnalysisError, Result, ResultExt};
pub use pipeline::{AgriculturalAnalyzer, RenderedCharts, ReportStage};
pub use profiler::DataProfiler;
pub use types::{
    Aggregation, ColumnKind, CorrelationMatrix, CorrelationRanking, DatasetSummary, GroupStats,
    GroupedTable, KeyFindings,
};
pub use visualization::ChartRenderer;
