//! Typed access to the columns the report depends on.
//!
//! [`AgriSchema::resolve`] checks every required column once, right after
//! loading, and materializes them into typed vectors. Stages then read
//! `schema.numeric(NumericField::Yield)` instead of looking columns up by
//! name, so a missing or mistyped column fails before any output is made.

use super::Dataset;
use crate::error::Result;
use crate::types::ColumnKind;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Categorical columns the report groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoricalField {
    CropType,
    Region,
    FarmingPractice,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 3] = [Self::CropType, Self::Region, Self::FarmingPractice];

    /// Column header in the CSV file.
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::CropType => "Crop_Type",
            Self::Region => "Region",
            Self::FarmingPractice => "Farming_Practice",
        }
    }

    /// Human-readable name used in table titles.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CropType => "Crop Type",
            Self::Region => "Region",
            Self::FarmingPractice => "Farming Practice",
        }
    }
}

/// Numeric measurements the report aggregates and plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericField {
    Yield,
    Profit,
    CarbonEmissions,
    BiodiversityScore,
    WaterUseEfficiency,
    SoilPh,
}

impl NumericField {
    pub const ALL: [NumericField; 6] = [
        Self::Yield,
        Self::Profit,
        Self::CarbonEmissions,
        Self::BiodiversityScore,
        Self::WaterUseEfficiency,
        Self::SoilPh,
    ];

    /// Column header in the CSV file.
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::Yield => "Yield(kg/ha)",
            Self::Profit => "Profit(USD/ha)",
            Self::CarbonEmissions => "Carbon_Emissions(kgCO2eq/ha)",
            Self::BiodiversityScore => "Biodiversity_Score",
            Self::WaterUseEfficiency => "Water_Use_Efficiency(kg/L)",
            Self::SoilPh => "Soil_pH",
        }
    }

    /// Short measure name used in table headers ("Average Yield").
    pub fn measure(&self) -> &'static str {
        match self {
            Self::Yield => "Yield",
            Self::Profit => "Profit",
            Self::CarbonEmissions => "Carbon Emissions",
            Self::BiodiversityScore => "Biodiversity Score",
            Self::WaterUseEfficiency => "Water Use Efficiency",
            Self::SoilPh => "Soil pH",
        }
    }

    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Self::Yield => Some("kg/ha"),
            Self::Profit => Some("USD/ha"),
            Self::CarbonEmissions => Some("kg CO2eq/ha"),
            Self::WaterUseEfficiency => Some("kg/L"),
            Self::BiodiversityScore | Self::SoilPh => None,
        }
    }

    /// Whether a column name is one of the known measurements.
    pub fn is_known_column(name: &str) -> bool {
        Self::ALL.iter().any(|field| field.column_name() == name)
    }
}

/// Required columns, validated and materialized once.
#[derive(Debug, Clone)]
pub struct AgriSchema {
    row_count: usize,
    crop_type: Vec<Option<String>>,
    region: Vec<Option<String>>,
    farming_practice: Vec<Option<String>>,
    yield_kg_ha: Vec<Option<f64>>,
    profit_usd_ha: Vec<Option<f64>>,
    carbon_emissions: Vec<Option<f64>>,
    biodiversity_score: Vec<Option<f64>>,
    water_use_efficiency: Vec<Option<f64>>,
    soil_ph: Vec<Option<f64>>,
}

impl AgriSchema {
    /// Validate the required columns of `dataset` and extract them.
    ///
    /// All columns are checked before any is extracted, categorical first, so
    /// the first violation in declaration order is the one reported.
    pub fn resolve(dataset: &Dataset) -> Result<Self> {
        for field in CategoricalField::ALL {
            dataset.require(field.column_name(), ColumnKind::Categorical)?;
        }
        for field in NumericField::ALL {
            dataset.require(field.column_name(), ColumnKind::Numeric)?;
        }

        let categorical =
            |field: CategoricalField| dataset.categorical_values(field.column_name());
        let numeric = |field: NumericField| dataset.numeric_values(field.column_name());

        let schema = Self {
            row_count: dataset.height(),
            crop_type: categorical(CategoricalField::CropType)?,
            region: categorical(CategoricalField::Region)?,
            farming_practice: categorical(CategoricalField::FarmingPractice)?,
            yield_kg_ha: numeric(NumericField::Yield)?,
            profit_usd_ha: numeric(NumericField::Profit)?,
            carbon_emissions: numeric(NumericField::CarbonEmissions)?,
            biodiversity_score: numeric(NumericField::BiodiversityScore)?,
            water_use_efficiency: numeric(NumericField::WaterUseEfficiency)?,
            soil_ph: numeric(NumericField::SoilPh)?,
        };
        debug!("Schema resolved for {} rows", schema.row_count);
        Ok(schema)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn categorical(&self, field: CategoricalField) -> &[Option<String>] {
        match field {
            CategoricalField::CropType => &self.crop_type,
            CategoricalField::Region => &self.region,
            CategoricalField::FarmingPractice => &self.farming_practice,
        }
    }

    pub fn numeric(&self, field: NumericField) -> &[Option<f64>] {
        match field {
            NumericField::Yield => &self.yield_kg_ha,
            NumericField::Profit => &self.profit_usd_ha,
            NumericField::CarbonEmissions => &self.carbon_emissions,
            NumericField::BiodiversityScore => &self.biodiversity_score,
            NumericField::WaterUseEfficiency => &self.water_use_efficiency,
            NumericField::SoilPh => &self.soil_ph,
        }
    }

    /// Number of distinct non-null values of a categorical field.
    pub fn distinct_count(&self, field: CategoricalField) -> usize {
        let mut seen: Vec<&str> = Vec::new();
        for value in self.categorical(field).iter().flatten() {
            if !seen.contains(&value.as_str()) {
                seen.push(value);
            }
        }
        seen.len()
    }
}
