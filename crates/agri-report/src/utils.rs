//! Shared helpers for dtype checks, rounding and console formatting.

use crate::types::ColumnKind;
use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Classify a dtype. Anything that is not a number is categorical.
pub fn column_kind(dtype: &DataType) -> ColumnKind {
    if is_numeric_dtype(dtype) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

// =============================================================================
// Number Formatting
// =============================================================================

/// Label printed wherever a statistic is undefined.
pub const UNDEFINED: &str = "undefined";

/// Round to a fixed number of decimal places, halves to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Format an optional statistic with fixed precision, or `undefined`.
pub fn format_optional(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => UNDEFINED.to_string(),
    }
}

// =============================================================================
// Console Layout
// =============================================================================

/// Width of the `=` rules framing section headers.
pub const SECTION_WIDTH: usize = 50;

/// Build a framed section header.
pub fn section_header(title: &str) -> String {
    let rule = "=".repeat(SECTION_WIDTH);
    format!("{rule}\n{title}\n{rule}\n")
}

/// Truncate a string to max length (in chars) with ellipsis.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
