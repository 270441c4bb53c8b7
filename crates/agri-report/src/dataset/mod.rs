//! The loaded dataset and its column classification.
//!
//! A [`Dataset`] is created once, never mutated, and handed by reference to
//! every reporting stage. Columns are split into numeric and categorical
//! names when the dataset is built; no stage re-derives that split.

mod loader;
pub mod schema;

use crate::error::{AnalysisError, Result, ResultExt};
use crate::types::ColumnKind;
use crate::utils::column_kind;
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

pub use schema::{AgriSchema, CategoricalField, NumericField};

/// An immutable in-memory table plus its column partition.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: String,
    frame: DataFrame,
    numeric_columns: Vec<String>,
    categorical_columns: Vec<String>,
}

impl Dataset {
    /// Load a CSV file and classify its columns.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Load`] when the file is missing or unparseable and
    /// [`AnalysisError::EmptyDataset`] when it holds no data rows.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading dataset from: {}", path.display());
        let frame = loader::read_csv(path)?;
        let dataset = Self::from_frame(frame, path.display().to_string())?;
        info!("Dataset loaded successfully: {:?}", dataset.shape());
        Ok(dataset)
    }

    /// Wrap an existing DataFrame, classifying its columns by dtype.
    pub fn from_frame(frame: DataFrame, source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        if frame.height() == 0 {
            return Err(AnalysisError::EmptyDataset(source));
        }

        let mut numeric_columns = Vec::new();
        let mut categorical_columns = Vec::new();
        for column in frame.get_columns() {
            let name = column.name().to_string();
            match column_kind(column.dtype()) {
                ColumnKind::Numeric => numeric_columns.push(name),
                ColumnKind::Categorical => categorical_columns.push(name),
            }
        }
        debug!(
            "Classified {} numeric and {} categorical columns",
            numeric_columns.len(),
            categorical_columns.len()
        );

        Ok(Self {
            source,
            frame,
            numeric_columns,
            categorical_columns,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.frame.shape()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// All column names in file order.
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    pub fn categorical_columns(&self) -> &[String] {
        &self.categorical_columns
    }

    /// Kind of a column, or `None` if the dataset has no such column.
    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        if self.numeric_columns.iter().any(|c| c == name) {
            Some(ColumnKind::Numeric)
        } else if self.categorical_columns.iter().any(|c| c == name) {
            Some(ColumnKind::Categorical)
        } else {
            None
        }
    }

    /// Check that `name` exists with the expected kind.
    pub fn require(&self, name: &str, expected: ColumnKind) -> Result<()> {
        match self.kind_of(name) {
            None => Err(AnalysisError::MissingColumn {
                column: name.to_string(),
                expected,
            }),
            Some(found) if found != expected => Err(AnalysisError::ColumnTypeMismatch {
                column: name.to_string(),
                expected,
                found,
            }),
            Some(_) => Ok(()),
        }
    }

    /// Values of a numeric column as f64; nulls and NaNs become `None`.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        self.require(name, ColumnKind::Numeric)?;
        let series = self
            .frame
            .column(name)?
            .as_materialized_series()
            .cast(&DataType::Float64)
            .context(format!("Casting '{}' to Float64", name))?;
        let values = series
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Ok(values)
    }

    /// Values of a categorical column as strings; nulls become `None`.
    pub fn categorical_values(&self, name: &str) -> Result<Vec<Option<String>>> {
        self.require(name, ColumnKind::Categorical)?;
        let series = self
            .frame
            .column(name)?
            .as_materialized_series()
            .cast(&DataType::String)
            .context(format!("Casting '{}' to String", name))?;
        let values = series
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();
        Ok(values)
    }

    /// The first `rows` rows, for the console preview.
    pub fn preview(&self, rows: usize) -> DataFrame {
        self.frame.head(Some(rows))
    }
}
