//! CSV reading with a quote-tolerant fallback.

use crate::error::{AnalysisError, Result};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Read a header-first CSV file into a DataFrame.
///
/// The first attempt honours `"` quoting; if polars rejects the file, a
/// second attempt reads it without quote handling. A missing file, an
/// unreadable file and a file neither attempt can parse all surface as
/// [`AnalysisError::Load`].
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    let display = path.display().to_string();

    if !path.is_file() {
        return Err(AnalysisError::Load {
            path: display,
            reason: "file not found".to_string(),
        });
    }

    match read_with_quote_char(path, Some(b'"')) {
        Ok(df) => Ok(df),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
            read_with_quote_char(path, None).map_err(|e| AnalysisError::Load {
                path: display,
                reason: e.to_string(),
            })
        }
    }
}

fn read_with_quote_char(path: &Path, quote_char: Option<u8>) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_infer_schema_length(None)
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(quote_char))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
}
