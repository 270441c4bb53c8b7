//! Chart data prepared from the analysis results, independent of drawing.

use super::colormap::{DEFAULT_BAR, PRACTICE_PALETTE, REGION_PALETTE};
use crate::analysis::{GroupSpec, GroupedAggregator};
use crate::dataset::{AgriSchema, CategoricalField, NumericField};
use crate::profiler::statistics::present;
use crate::types::{Aggregation, GroupStats, GroupedTable};
use plotters::style::RGBColor;

/// Bars of one chart, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub title: String,
    pub y_desc: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub palette: Vec<RGBColor>,
}

impl BarSeries {
    fn from_groups<'a>(
        title: &str,
        y_desc: &str,
        groups: impl IntoIterator<Item = &'a GroupStats>,
        palette: &[RGBColor],
    ) -> Self {
        let (labels, values) = groups
            .into_iter()
            .filter_map(|g| g.mean.map(|mean| (g.label.clone(), mean)))
            .unzip();
        Self {
            title: title.to_string(),
            y_desc: y_desc.to_string(),
            labels,
            values,
            palette: palette.to_vec(),
        }
    }

    /// Color of the bar at `index`, cycling through the palette.
    pub fn color(&self, index: usize) -> RGBColor {
        if self.palette.is_empty() {
            DEFAULT_BAR
        } else {
            self.palette[index % self.palette.len()]
        }
    }

    /// Y axis range covering every bar and the zero line, with headroom.
    pub fn value_range(&self) -> (f64, f64) {
        let max = self.values.iter().copied().fold(0.0f64, f64::max);
        let min = self.values.iter().copied().fold(0.0f64, f64::min);
        if max == 0.0 && min == 0.0 {
            return (0.0, 1.0);
        }
        (min * 1.1, max * 1.1)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Equal-width bins over [min, max]; the last bin is closed on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBins {
    pub edges: Vec<f64>,
    pub counts: Vec<u32>,
}

impl HistogramBins {
    /// Bin the values, or `None` if there is nothing to bin.
    ///
    /// A constant column spans [v - 0.5, v + 0.5].
    pub fn compute(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }
        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0u32; bins];
        for value in values {
            let index = (((value - lo) / width).floor() as usize).min(bins - 1);
            counts[index] += 1;
        }

        Some(Self { edges, counts })
    }

    pub fn range(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }

    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// (left edge, right edge, count) per bin.
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64, u32)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, count)| (edge[0], edge[1], *count))
    }
}

/// Everything drawn in the 2x2 overview image.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewData {
    pub crop_yield: BarSeries,
    pub region_profit: BarSeries,
    pub practice_carbon: BarSeries,
    pub soil_ph: Option<HistogramBins>,
}

impl OverviewData {
    pub fn from_schema(schema: &AgriSchema, histogram_bins: usize) -> Self {
        let means = |group, value| -> GroupedTable {
            GroupedAggregator::aggregate(schema, GroupSpec::new(group, value, Aggregation::Mean))
        };

        let crop_yield = means(CategoricalField::CropType, NumericField::Yield);
        let region_profit = means(CategoricalField::Region, NumericField::Profit);
        let practice_carbon = means(
            CategoricalField::FarmingPractice,
            NumericField::CarbonEmissions,
        );

        Self {
            crop_yield: BarSeries::from_groups(
                "Average Yield by Crop Type",
                "Yield (kg/ha)",
                crop_yield.sorted_by_mean_desc(),
                &[DEFAULT_BAR],
            ),
            region_profit: BarSeries::from_groups(
                "Average Profit by Region",
                "Profit (USD/ha)",
                region_profit.sorted_by_mean_desc(),
                &REGION_PALETTE,
            ),
            practice_carbon: BarSeries::from_groups(
                "Carbon Emissions by Farming Practice",
                "CO2 Emissions (kg/ha)",
                &practice_carbon.groups,
                &PRACTICE_PALETTE,
            ),
            soil_ph: HistogramBins::compute(
                &present(schema.numeric(NumericField::SoilPh)),
                histogram_bins,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(label: &str, mean: Option<f64>) -> GroupStats {
        GroupStats {
            label: label.to_string(),
            count: 1,
            mean,
            median: None,
            std: None,
        }
    }

    #[test]
    fn test_histogram_twenty_bins() {
        let values: Vec<f64> = (0..=40).map(|i| 5.0 + i as f64 * 0.1).collect();
        let hist = HistogramBins::compute(&values, 20).unwrap();
        assert_eq!(hist.counts.len(), 20);
        assert_eq!(hist.edges.len(), 21);
        assert_eq!(hist.counts.iter().sum::<u32>(), 41);
        let (lo, hi) = hist.range();
        assert_eq!(lo, 5.0);
        assert!((hi - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_max_lands_in_last_bin() {
        let hist = HistogramBins::compute(&[0.0, 1.0, 2.0, 4.0], 4).unwrap();
        assert_eq!(hist.counts, vec![1, 1, 1, 1]);
        assert_eq!(hist.max_count(), 1);
    }

    #[test]
    fn test_histogram_constant_values() {
        let hist = HistogramBins::compute(&[6.5, 6.5, 6.5], 20).unwrap();
        assert_eq!(hist.range(), (6.0, 7.0));
        assert_eq!(hist.counts.iter().sum::<u32>(), 3);
    }

    #[test]
    fn test_histogram_empty() {
        assert_eq!(HistogramBins::compute(&[], 20), None);
    }

    #[test]
    fn test_bar_series_skips_undefined_means() {
        let groups = [group("Wheat", Some(3.0)), group("Rice", None)];
        let series = BarSeries::from_groups("t", "y", &groups, &PRACTICE_PALETTE);
        assert_eq!(series.labels, vec!["Wheat".to_string()]);
        assert_eq!(series.values, vec![3.0]);
    }

    #[test]
    fn test_bar_series_palette_cycles() {
        let groups = [
            group("a", Some(1.0)),
            group("b", Some(2.0)),
            group("c", Some(3.0)),
            group("d", Some(4.0)),
        ];
        let series = BarSeries::from_groups("t", "y", &groups, &PRACTICE_PALETTE);
        assert_eq!(series.color(3), series.color(0));
    }

    #[test]
    fn test_value_range_handles_negative_bars() {
        let groups = [group("a", Some(-10.0)), group("b", Some(20.0))];
        let series = BarSeries::from_groups("t", "y", &groups, &[]);
        let (lo, hi) = series.value_range();
        assert!(lo < -10.0 && hi > 20.0);
        assert_eq!(series.color(1), DEFAULT_BAR);
    }
}
