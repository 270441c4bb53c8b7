//! Named stages of a report run.

use serde::{Deserialize, Serialize};

/// Stages of a report run, in execution order.
///
/// The run is strictly linear: every stage runs once, and a failing stage
/// aborts the ones after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStage {
    /// Reading the CSV file and validating the schema
    Loading,
    /// Shape, preview, column info and descriptive statistics
    Summary,
    /// Yield and profit grouped by crop, region and practice
    CropPerformance,
    /// Emissions, biodiversity and water use grouped tables
    Sustainability,
    /// Correlation matrix and rankings
    Correlations,
    /// Chart images
    Visualizations,
    /// Final summary
    Complete,
}

impl ReportStage {
    pub const ALL: [ReportStage; 7] = [
        Self::Loading,
        Self::Summary,
        Self::CropPerformance,
        Self::Sustainability,
        Self::Correlations,
        Self::Visualizations,
        Self::Complete,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Data",
            Self::Summary => "Summarizing Dataset",
            Self::CropPerformance => "Analyzing Crop Performance",
            Self::Sustainability => "Analyzing Sustainability",
            Self::Correlations => "Computing Correlations",
            Self::Visualizations => "Creating Visualizations",
            Self::Complete => "Complete",
        }
    }

    /// The stage that runs after this one, if any.
    pub fn next(&self) -> Option<ReportStage> {
        let index = Self::ALL.iter().position(|s| s == self)?;
        Self::ALL.get(index + 1).copied()
    }
}

impl std::fmt::Display for ReportStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
