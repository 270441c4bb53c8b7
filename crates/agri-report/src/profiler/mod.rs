//! Dataset profiling for the summary section.
//!
//! This module provides:
//! - Per-column dtype, kind and non-null counts
//! - Descriptive statistics for numeric columns
//! - Value counts for categorical columns

pub(crate) mod statistics;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::types::{ColumnInfo, DatasetSummary, ValueCounts};
use crate::utils::column_kind;
use tracing::debug;

/// Data profiler building the summary shown at the start of a report.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile an entire dataset.
    pub fn summarize(dataset: &Dataset) -> Result<DatasetSummary> {
        let columns = dataset
            .frame()
            .get_columns()
            .iter()
            .map(|column| ColumnInfo {
                name: column.name().to_string(),
                dtype: format!("{}", column.dtype()),
                kind: column_kind(column.dtype()),
                non_null_count: column.len() - column.null_count(),
            })
            .collect();

        let mut numeric = Vec::with_capacity(dataset.numeric_columns().len());
        for name in dataset.numeric_columns() {
            let values = dataset.numeric_values(name)?;
            numeric.push(statistics::describe(name, &values));
        }

        let mut categorical = Vec::with_capacity(dataset.categorical_columns().len());
        for name in dataset.categorical_columns() {
            let values = dataset.categorical_values(name)?;
            categorical.push(ValueCounts {
                column: name.clone(),
                counts: statistics::value_counts(&values),
            });
        }

        debug!(
            "Profiled {} numeric and {} categorical columns",
            numeric.len(),
            categorical.len()
        );

        Ok(DatasetSummary {
            shape: dataset.shape(),
            columns,
            numeric,
            categorical,
        })
    }
}
