//! Key findings for the closing summary, derived from the data.

use super::grouped::{GroupSpec, GroupedAggregator};
use crate::dataset::{AgriSchema, CategoricalField, NumericField};
use crate::types::{Aggregation, GroupStats, GroupedTable, KeyFindings};

pub fn key_findings(schema: &AgriSchema) -> KeyFindings {
    let table = |group, value| {
        GroupedAggregator::aggregate(schema, GroupSpec::new(group, value, Aggregation::Mean))
    };

    let crop_yield = table(CategoricalField::CropType, NumericField::Yield);
    let region_profit = table(CategoricalField::Region, NumericField::Profit);
    let practice_carbon = table(CategoricalField::FarmingPractice, NumericField::CarbonEmissions);

    KeyFindings {
        farm_count: schema.row_count(),
        region_count: schema.distinct_count(CategoricalField::Region),
        crop_type_count: schema.distinct_count(CategoricalField::CropType),
        practice_count: schema.distinct_count(CategoricalField::FarmingPractice),
        top_yield_crop: highest_mean(&crop_yield),
        top_profit_region: highest_mean(&region_profit),
        lowest_emission_practice: lowest_mean(&practice_carbon),
    }
}

fn labelled(group: &GroupStats) -> Option<(String, f64)> {
    group.mean.map(|mean| (group.label.clone(), mean))
}

fn highest_mean(table: &GroupedTable) -> Option<(String, f64)> {
    table.sorted_by_mean_desc().first().and_then(|g| labelled(g))
}

fn lowest_mean(table: &GroupedTable) -> Option<(String, f64)> {
    table
        .sorted_by_mean_desc()
        .into_iter()
        .rev()
        .find_map(labelled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use polars::prelude::*;

    #[test]
    fn test_key_findings() {
        let frame = df!(
            "Crop_Type" => &["Wheat", "Corn", "Wheat", "Rice"],
            "Region" => &["North", "South", "North", "East"],
            "Farming_Practice" => &["Organic", "Conventional", "Organic", "Integrated"],
            "Yield(kg/ha)" => &[100.0, 400.0, 200.0, 250.0],
            "Profit(USD/ha)" => &[500.0, 700.0, 800.0, 100.0],
            "Carbon_Emissions(kgCO2eq/ha)" => &[50.0, 80.0, 60.0, 40.0],
            "Biodiversity_Score" => &[7.0, 4.0, 8.0, 6.0],
            "Water_Use_Efficiency(kg/L)" => &[1.2, 0.8, 1.1, 0.9],
            "Soil_pH" => &[6.5, 7.1, 6.8, 6.0]
        )
        .unwrap();
        let dataset = Dataset::from_frame(frame, "memory").unwrap();
        let schema = AgriSchema::resolve(&dataset).unwrap();
        let findings = key_findings(&schema);

        assert_eq!(findings.farm_count, 4);
        assert_eq!(findings.region_count, 3);
        assert_eq!(findings.crop_type_count, 3);
        assert_eq!(findings.practice_count, 3);
        assert_eq!(findings.top_yield_crop, Some(("Corn".to_string(), 400.0)));
        assert_eq!(findings.top_profit_region, Some(("South".to_string(), 700.0)));
        assert_eq!(
            findings.lowest_emission_practice,
            Some(("Integrated".to_string(), 40.0))
        );
    }
}
