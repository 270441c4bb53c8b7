//! Group-by aggregation of a numeric field over a categorical field.

use crate::dataset::{AgriSchema, CategoricalField, NumericField};
use crate::profiler::statistics::{mean, median, present, sample_std};
use crate::types::{Aggregation, GroupStats, GroupedTable};
use crate::utils::round_to;
use tracing::debug;

/// One (group, value) pair and the statistics to report for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpec {
    pub group: CategoricalField,
    pub value: NumericField,
    pub aggregation: Aggregation,
}

impl GroupSpec {
    pub const fn new(group: CategoricalField, value: NumericField, aggregation: Aggregation) -> Self {
        Self {
            group,
            value,
            aggregation,
        }
    }

    /// Table title, e.g. "Yield by Crop Type (kg/ha)".
    pub fn title(&self) -> String {
        let base = match self.aggregation {
            Aggregation::MeanMedianStd => {
                format!("{} by {}", self.value.measure(), self.group.display_name())
            }
            Aggregation::Mean => format!(
                "Average {} by {}",
                self.value.measure(),
                self.group.display_name()
            ),
        };
        match self.value.unit() {
            Some(unit) => format!("{base} ({unit})"),
            None => base,
        }
    }
}

/// Tables printed in the crop performance section.
pub const CROP_PERFORMANCE: [GroupSpec; 4] = [
    GroupSpec::new(CategoricalField::CropType, NumericField::Yield, Aggregation::MeanMedianStd),
    GroupSpec::new(CategoricalField::CropType, NumericField::Profit, Aggregation::MeanMedianStd),
    GroupSpec::new(CategoricalField::Region, NumericField::Yield, Aggregation::MeanMedianStd),
    GroupSpec::new(
        CategoricalField::FarmingPractice,
        NumericField::Yield,
        Aggregation::MeanMedianStd,
    ),
];

/// Tables printed in the sustainability section.
pub const SUSTAINABILITY: [GroupSpec; 3] = [
    GroupSpec::new(
        CategoricalField::FarmingPractice,
        NumericField::CarbonEmissions,
        Aggregation::Mean,
    ),
    GroupSpec::new(
        CategoricalField::FarmingPractice,
        NumericField::BiodiversityScore,
        Aggregation::Mean,
    ),
    GroupSpec::new(
        CategoricalField::CropType,
        NumericField::WaterUseEfficiency,
        Aggregation::Mean,
    ),
];

pub struct GroupedAggregator;

impl GroupedAggregator {
    /// Aggregate one grouping over the schema's columns.
    pub fn aggregate(schema: &AgriSchema, grouping: GroupSpec) -> GroupedTable {
        let groups = group_stats(
            schema.categorical(grouping.group),
            schema.numeric(grouping.value),
            grouping.aggregation,
        );
        debug!(
            "Aggregated {} by {}: {} groups",
            grouping.value.column_name(),
            grouping.group.column_name(),
            groups.len()
        );

        GroupedTable {
            title: grouping.title(),
            group_column: grouping.group.column_name().to_string(),
            value_column: grouping.value.column_name().to_string(),
            measure: grouping.value.measure().to_string(),
            aggregation: grouping.aggregation,
            groups,
        }
    }

    pub fn aggregate_all(schema: &AgriSchema, groupings: &[GroupSpec]) -> Vec<GroupedTable> {
        groupings
            .iter()
            .map(|grouping| Self::aggregate(schema, *grouping))
            .collect()
    }
}

/// Partition `values` by `labels` and summarize each partition.
///
/// Groups appear in first-encounter order. Rows with a null label are
/// dropped; null values count toward the group's rows but not its
/// statistics. Results are rounded to 2 decimals.
pub fn group_stats(
    labels: &[Option<String>],
    values: &[Option<f64>],
    aggregation: Aggregation,
) -> Vec<GroupStats> {
    let mut partitions: Vec<(&str, Vec<Option<f64>>)> = Vec::new();
    for (label, value) in labels.iter().zip(values) {
        let Some(label) = label else {
            continue;
        };
        match partitions.iter_mut().find(|(l, _)| *l == label.as_str()) {
            Some((_, bucket)) => bucket.push(*value),
            None => partitions.push((label.as_str(), vec![*value])),
        }
    }

    partitions
        .into_iter()
        .map(|(label, bucket)| {
            let observed = present(&bucket);
            let rounded = |v: Option<f64>| v.map(|x| round_to(x, 2));
            let (median, std) = match aggregation {
                Aggregation::Mean => (None, None),
                Aggregation::MeanMedianStd => (
                    rounded(median(&observed)),
                    rounded(sample_std(&observed)),
                ),
            };
            GroupStats {
                label: label.to_string(),
                count: bucket.len(),
                mean: rounded(mean(&observed)),
                median,
                std,
            }
        })
        .collect()
}
