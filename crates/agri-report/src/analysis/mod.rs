//! Grouped statistics, correlations and closing findings.

pub mod correlation;
mod findings;
pub mod grouped;

pub use correlation::{CorrelationAnalyzer, pearson};
pub use findings::key_findings;
pub use grouped::{CROP_PERFORMANCE, GroupSpec, GroupedAggregator, SUSTAINABILITY, group_stats};
