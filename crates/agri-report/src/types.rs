use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a column, decided once at load time from the inferred dtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Categorical => write!(f, "categorical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub kind: ColumnKind,
    pub non_null_count: usize,
}

/// Descriptive statistics of one numeric column.
///
/// All statistics are `None` when the column has no non-null values; `std`
/// is also `None` with fewer than two values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Row counts per distinct value of a categorical column, most frequent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCounts {
    pub column: String,
    pub counts: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub shape: (usize, usize),
    pub columns: Vec<ColumnInfo>,
    pub numeric: Vec<NumericSummary>,
    pub categorical: Vec<ValueCounts>,
}

/// Statistics of the value column for one group label, rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub label: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std: Option<f64>,
}

/// Which statistics a grouped table reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Mean only.
    Mean,
    /// Mean, median and sample standard deviation.
    MeanMedianStd,
}

/// One group-by result: a value column aggregated per group label.
///
/// Groups are kept in first-encounter order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedTable {
    pub title: String,
    pub group_column: String,
    pub value_column: String,
    /// Short measure name used in headers, e.g. "Yield".
    pub measure: String,
    pub aggregation: Aggregation,
    pub groups: Vec<GroupStats>,
}

impl GroupedTable {
    /// Groups ordered by ascending label.
    pub fn sorted_by_label(&self) -> Vec<&GroupStats> {
        let mut groups: Vec<&GroupStats> = self.groups.iter().collect();
        groups.sort_by(|a, b| a.label.cmp(&b.label));
        groups
    }

    /// Groups ordered by descending mean; undefined means go last.
    pub fn sorted_by_mean_desc(&self) -> Vec<&GroupStats> {
        let mut groups: Vec<&GroupStats> = self.groups.iter().collect();
        groups.sort_by(|a, b| match (a.mean, b.mean) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        groups
    }

    pub fn get(&self, label: &str) -> Option<&GroupStats> {
        self.groups.iter().find(|g| g.label == label)
    }
}

/// Pairwise Pearson correlations among numeric columns.
///
/// `values[i][j]` is `None` when the coefficient is undefined (fewer than two
/// complete pairs, or zero variance on either side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.index_of(row)?;
        let j = self.index_of(col)?;
        self.values[i][j]
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEntry {
    pub column: String,
    pub value: Option<f64>,
}

/// Correlations of one target column against every other numeric column,
/// highest first, undefined entries last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationRanking {
    pub target: String,
    pub entries: Vec<CorrelationEntry>,
}

/// Data-derived findings printed at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFindings {
    pub farm_count: usize,
    pub region_count: usize,
    pub crop_type_count: usize,
    pub practice_count: usize,
    pub top_yield_crop: Option<(String, f64)>,
    pub top_profit_region: Option<(String, f64)>,
    pub lowest_emission_practice: Option<(String, f64)>,
}

static_assertions::assert_impl_all!(DatasetSummary: Send, Sync);
static_assertions::assert_impl_all!(GroupedTable: Send, Sync);
static_assertions::assert_impl_all!(CorrelationMatrix: Send, Sync);
