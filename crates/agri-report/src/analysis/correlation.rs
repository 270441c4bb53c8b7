//! Pearson correlation matrix and per-target rankings.

use crate::dataset::{Dataset, NumericField};
use crate::error::{AnalysisError, Result};
use crate::types::{ColumnKind, CorrelationEntry, CorrelationMatrix, CorrelationRanking};
use anofox_statistics::correlation;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Confidence level handed to the estimator; only the point estimate is kept.
const CONFIDENCE_LEVEL: f64 = 0.95;

/// Pearson coefficient over pairwise-complete observations.
///
/// Returns `None` with fewer than two complete pairs, when either side is
/// constant, or when the estimator rejects the sample, so a zero variance
/// never turns into NaN.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip();

    if xs.len() < 2 || is_constant(&xs) || is_constant(&ys) {
        return None;
    }
    if xs.len() == 2 {
        // two distinct points are always on a line
        return Some(((xs[1] - xs[0]) * (ys[1] - ys[0])).signum());
    }

    correlation::pearson(&xs, &ys, Some(CONFIDENCE_LEVEL))
        .ok()
        .map(|result| result.estimate)
        .filter(|r| r.is_finite())
        .map(|r| r.clamp(-1.0, 1.0))
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

pub struct CorrelationAnalyzer;

impl CorrelationAnalyzer {
    /// Correlation matrix over the dataset's numeric columns, in file order.
    ///
    /// With `include_extra_numeric` false, only the known measurement
    /// columns take part.
    pub fn from_dataset(dataset: &Dataset, include_extra_numeric: bool) -> Result<CorrelationMatrix> {
        let mut columns = Vec::new();
        for name in dataset.numeric_columns() {
            if !include_extra_numeric && !NumericField::is_known_column(name) {
                debug!("Excluding extra numeric column '{}' from correlations", name);
                continue;
            }
            columns.push((name.clone(), dataset.numeric_values(name)?));
        }
        Ok(Self::matrix(&columns))
    }

    /// Full symmetric matrix for named columns.
    pub fn matrix(columns: &[(String, Vec<Option<f64>>)]) -> CorrelationMatrix {
        let size = columns.len();
        let mut values = vec![vec![None; size]; size];

        for i in 0..size {
            for j in i..size {
                let r = pearson(&columns[i].1, &columns[j].1);
                // the diagonal is exactly 1 whenever it is defined
                let r = if i == j { r.map(|_| 1.0) } else { r };
                values[i][j] = r;
                values[j][i] = r;
            }
            if values[i][i].is_none() {
                warn!(
                    "Column '{}' has zero variance; its correlations are undefined",
                    columns[i].0
                );
            }
        }

        CorrelationMatrix {
            columns: columns.iter().map(|(name, _)| name.clone()).collect(),
            values,
        }
    }

    /// Correlations of `target` with every other column, highest first.
    ///
    /// The sort is stable so ties keep column order; undefined entries go
    /// last and the self entry is left out.
    pub fn rank(matrix: &CorrelationMatrix, target: &str) -> Result<CorrelationRanking> {
        let row = matrix
            .index_of(target)
            .ok_or_else(|| AnalysisError::MissingColumn {
                column: target.to_string(),
                expected: ColumnKind::Numeric,
            })?;

        let mut entries: Vec<CorrelationEntry> = matrix
            .columns
            .iter()
            .zip(&matrix.values[row])
            .filter(|(name, _)| name.as_str() != target)
            .map(|(name, value)| CorrelationEntry {
                column: name.clone(),
                value: *value,
            })
            .collect();

        entries.sort_by(|a, b| match (a.value, b.value) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        Ok(CorrelationRanking {
            target: target.to_string(),
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(name: &str, values: &[f64]) -> (String, Vec<Option<f64>>) {
        (name.to_string(), values.iter().map(|v| Some(*v)).collect())
    }

    #[test]
    fn test_pearson_perfect() {
        let x = [Some(1.0), Some(2.0), Some(3.0)];
        let y = [Some(2.0), Some(4.0), Some(6.0)];
        let z = [Some(3.0), Some(2.0), Some(1.0)];
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &z).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_partial_correlation() {
        let x = [Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let y = [Some(2.0), Some(1.0), Some(4.0), Some(3.0)];
        // sxy = 3, sxx = syy = 5
        assert!((pearson(&x, &y).unwrap() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_two_pairs_follow_direction() {
        let x = [Some(1.0), Some(5.0)];
        assert_eq!(pearson(&x, &[Some(3.0), Some(9.0)]), Some(1.0));
        assert_eq!(pearson(&x, &[Some(9.0), Some(3.0)]), Some(-1.0));
    }

    #[test]
    fn test_pearson_zero_variance_is_undefined() {
        let x = [Some(1.0), Some(2.0), Some(3.0)];
        let flat = [Some(0.1), Some(0.1), Some(0.1)];
        assert_eq!(pearson(&x, &flat), None);
        assert_eq!(pearson(&flat, &flat), None);
    }

    #[test]
    fn test_pearson_pairwise_complete() {
        let x = [Some(1.0), None, Some(2.0), Some(3.0)];
        let y = [Some(1.0), Some(100.0), Some(2.0), None];
        // only rows 0 and 2 are complete
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(pearson(&[Some(1.0)], &[Some(2.0)]), None);
    }

    #[test]
    fn test_matrix_symmetric_with_unit_diagonal() {
        let columns = vec![
            col("a", &[1.0, 2.0, 3.0, 4.0]),
            col("b", &[2.0, 1.0, 4.0, 3.0]),
            col("c", &[9.0, 7.0, 8.0, 1.0]),
        ];
        let m = CorrelationAnalyzer::matrix(&columns);
        for i in 0..m.len() {
            assert_eq!(m.values[i][i], Some(1.0));
            for j in 0..m.len() {
                let (a, b) = (m.values[i][j].unwrap(), m.values[j][i].unwrap());
                assert!((a - b).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_rank_sorted_and_excludes_self() {
        let columns = vec![
            col("Yield(kg/ha)", &[1.0, 2.0, 3.0, 4.0]),
            col("neg", &[4.0, 3.0, 2.0, 1.0]),
            col("pos", &[1.0, 2.0, 3.0, 5.0]),
            col("flat", &[7.0, 7.0, 7.0, 7.0]),
            col("mixed", &[2.0, 1.0, 4.0, 3.0]),
        ];
        let m = CorrelationAnalyzer::matrix(&columns);
        let ranking = CorrelationAnalyzer::rank(&m, "Yield(kg/ha)").unwrap();

        let names: Vec<_> = ranking.entries.iter().map(|e| e.column.as_str()).collect();
        assert_eq!(names, vec!["pos", "mixed", "neg", "flat"]);
        assert!(!names.contains(&"Yield(kg/ha)"));
        assert_eq!(ranking.entries.last().unwrap().value, None);

        let defined: Vec<f64> = ranking.entries.iter().filter_map(|e| e.value).collect();
        assert!(defined.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_rank_ties_keep_column_order() {
        let columns = vec![
            col("t", &[1.0, 2.0, 3.0]),
            col("first", &[2.0, 4.0, 6.0]),
            col("second", &[3.0, 6.0, 9.0]),
        ];
        let m = CorrelationAnalyzer::matrix(&columns);
        let ranking = CorrelationAnalyzer::rank(&m, "t").unwrap();
        let names: Vec<_> = ranking.entries.iter().map(|e| e.column.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_rank_unknown_target() {
        let m = CorrelationAnalyzer::matrix(&[col("a", &[1.0, 2.0])]);
        let err = CorrelationAnalyzer::rank(&m, "Profit(USD/ha)").unwrap_err();
        assert_eq!(err.error_code(), "MISSING_COLUMN");
    }
}
