//! Error types for the agricultural report generator.
//!
//! Every error is fatal for the run: the binary prints it and exits. The
//! variants mirror the places a run can fail: loading the file, validating
//! the schema, and writing the chart images.

use crate::types::ColumnKind;
use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for report generation.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The input file could not be read or parsed.
    #[error("Failed to load dataset from '{path}': {reason}")]
    Load { path: String, reason: String },

    /// The input file has a header but no data rows.
    #[error("Dataset '{0}' contains no rows")]
    EmptyDataset(String),

    /// A required column is absent from the dataset.
    #[error("Required {expected} column '{column}' not found in dataset")]
    MissingColumn { column: String, expected: ColumnKind },

    /// A required column exists but was inferred with the wrong type.
    #[error("Column '{column}' must be {expected} but was inferred as {found}")]
    ColumnTypeMismatch {
        column: String,
        expected: ColumnKind,
        found: ColumnKind,
    },

    /// A chart could not be drawn or written to disk.
    #[error("Failed to render chart: {0}")]
    Render(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AnalysisError>,
    },
}

impl AnalysisError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AnalysisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build a render error from any displayable drawing failure.
    pub fn render(err: impl std::fmt::Display) -> Self {
        AnalysisError::Render(err.to_string())
    }

    /// Get a stable error code, usable by scripts wrapping the binary.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Load { .. } => "LOAD_ERROR",
            Self::EmptyDataset(_) => "EMPTY_DATASET",
            Self::MissingColumn { .. } => "MISSING_COLUMN",
            Self::ColumnTypeMismatch { .. } => "COLUMN_TYPE_MISMATCH",
            Self::Render(_) => "RENDER_ERROR",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error happened while loading the input, before any stage ran.
    pub fn is_load_error(&self) -> bool {
        match self {
            Self::Load { .. } | Self::EmptyDataset(_) => true,
            Self::WithContext { source, .. } => source.is_load_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as `{ "code": ..., "message": ... }`.
impl Serialize for AnalysisError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AnalysisError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalysisError::Polars(e).with_context(context))
    }
}
