//! Console text for each report section.
//!
//! Every function returns the finished text instead of printing it, so the
//! binary decides where it goes and tests can compare whole sections.

use crate::types::{
    Aggregation, ColumnKind, CorrelationRanking, DatasetSummary, GroupedTable, KeyFindings,
    NumericSummary,
};
use crate::utils::{format_optional, section_header, truncate_str, UNDEFINED};
use polars::prelude::DataFrame;
use std::path::Path;

const NAME_WIDTH: usize = 30;
const STAT_WIDTH: usize = 12;

fn finish(mut lines: Vec<String>) -> String {
    lines.push(String::new());
    lines.join("\n")
}

/// Shape, preview, column info, numeric statistics and categorical counts.
pub fn basic_info(summary: &DatasetSummary, preview: &DataFrame) -> String {
    let mut lines = vec![section_header("AGRICULTURAL DATA ANALYSIS")];
    let (rows, columns) = summary.shape;
    lines.push(format!("Dataset Shape: {rows} rows, {columns} columns"));

    lines.push(String::new());
    lines.push(format!("First {} rows:", preview.height()));
    lines.push(format!("{preview}"));

    lines.push(String::new());
    lines.push("Dataset Info:".to_string());
    lines.push(format!(
        "{:<NAME_WIDTH$} {:<10} {:<12} {:>14}",
        "Column", "Dtype", "Kind", "Non-Null Count"
    ));
    lines.push("-".repeat(NAME_WIDTH + 39));
    for column in &summary.columns {
        lines.push(format!(
            "{:<NAME_WIDTH$} {:<10} {:<12} {:>14}",
            truncate_str(&column.name, NAME_WIDTH),
            column.dtype,
            column.kind.to_string(),
            column.non_null_count
        ));
    }
    let numeric = summary
        .columns
        .iter()
        .filter(|c| c.kind == ColumnKind::Numeric)
        .count();
    lines.push(format!(
        "Numeric columns: {}, Categorical columns: {}",
        numeric,
        summary.columns.len() - numeric
    ));

    lines.push(String::new());
    lines.push("Numerical Summary:".to_string());
    lines.push(describe_header());
    lines.extend(summary.numeric.iter().map(describe_row));

    lines.push(String::new());
    lines.push("Categorical Variables Distribution:".to_string());
    for counts in &summary.categorical {
        lines.push(String::new());
        lines.push(format!("{}:", counts.column));
        for (value, count) in &counts.counts {
            lines.push(format!("  {value}: {count}"));
        }
    }

    finish(lines)
}

fn describe_header() -> String {
    let mut header = format!("{:<NAME_WIDTH$} {:>8}", "Column", "count");
    for stat in ["mean", "std", "min", "25%", "50%", "75%", "max"] {
        header.push_str(&format!(" {stat:>STAT_WIDTH$}"));
    }
    header
}

fn describe_row(stats: &NumericSummary) -> String {
    let mut row = format!(
        "{:<NAME_WIDTH$} {:>8}",
        truncate_str(&stats.column, NAME_WIDTH),
        stats.count
    );
    for value in [
        stats.mean,
        stats.std,
        stats.min,
        stats.q25,
        stats.median,
        stats.q75,
        stats.max,
    ] {
        row.push_str(&format!(" {:>STAT_WIDTH$}", format_optional(value, 2)));
    }
    row
}

/// One grouped table, groups listed by ascending label.
pub fn grouped_table(table: &GroupedTable) -> String {
    let measure = &table.measure;
    let headers = match table.aggregation {
        Aggregation::Mean => vec![format!("Average {measure}")],
        Aggregation::MeanMedianStd => vec![
            format!("Average {measure}"),
            format!("Median {measure}"),
            format!("{measure} Std Dev"),
        ],
    };
    let label_width = table
        .groups
        .iter()
        .map(|g| g.label.chars().count())
        .chain([table.group_column.chars().count()])
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = headers.iter().map(|h| h.len().max(STAT_WIDTH)).collect();

    let mut lines = vec![String::new(), format!("{}:", table.title)];
    let mut header = format!("{:<label_width$}", table.group_column);
    for (title, width) in headers.iter().zip(widths.iter().copied()) {
        header.push_str(&format!("  {title:>width$}"));
    }
    lines.push(header);

    for group in table.sorted_by_label() {
        let values = match table.aggregation {
            Aggregation::Mean => vec![group.mean],
            Aggregation::MeanMedianStd => vec![group.mean, group.median, group.std],
        };
        let mut row = format!("{:<label_width$}", group.label);
        for (value, width) in values.into_iter().zip(widths.iter().copied()) {
            row.push_str(&format!("  {:>width$}", format_optional(value, 2)));
        }
        lines.push(row);
    }

    finish(lines)
}

fn section(title: &str, tables: &[GroupedTable]) -> String {
    let mut text = section_header(title);
    for table in tables {
        text.push_str(&grouped_table(table));
    }
    text
}

pub fn crop_performance(tables: &[GroupedTable]) -> String {
    section("CROP PERFORMANCE ANALYSIS", tables)
}

pub fn sustainability(tables: &[GroupedTable]) -> String {
    section("SUSTAINABILITY ANALYSIS", tables)
}

/// Ranked correlations, 3 decimals, undefined entries flagged.
pub fn correlations(rankings: &[CorrelationRanking]) -> String {
    let mut lines = vec![section_header("CORRELATION ANALYSIS")];
    for ranking in rankings {
        lines.push(format!("Correlations with {}:", ranking.target));
        for entry in &ranking.entries {
            match entry.value {
                Some(r) => lines.push(format!("  {}: {:.3}", entry.column, r)),
                None => lines.push(format!(
                    "  {}: {} (zero variance or too few complete pairs)",
                    entry.column, UNDEFINED
                )),
            }
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

pub fn visualizations_header() -> String {
    section_header("CREATING VISUALIZATIONS")
}

/// Confirmation line for a written chart.
pub fn chart_saved(description: &str, path: &Path) -> String {
    format!("Saved {} to '{}'\n", description, path.display())
}

fn finding(label: &str, value: &Option<(String, f64)>, unit: &str) -> String {
    match value {
        Some((name, mean)) => format!("- {label}: {name} ({mean:.2} {unit})"),
        None => format!("- {label}: {UNDEFINED}"),
    }
}

/// Closing section with findings computed from the data.
pub fn final_summary(findings: &KeyFindings, output_dir: &Path) -> String {
    let lines = vec![
        section_header("ANALYSIS COMPLETE"),
        "Key Findings:".to_string(),
        format!("- Farms analyzed: {}", findings.farm_count),
        format!(
            "- Regions: {}, Crop types: {}, Farming practices: {}",
            findings.region_count, findings.crop_type_count, findings.practice_count
        ),
        finding("Highest average yield", &findings.top_yield_crop, "kg/ha"),
        finding("Highest average profit", &findings.top_profit_region, "USD/ha"),
        finding(
            "Lowest average carbon emissions",
            &findings.lowest_emission_practice,
            "kg CO2eq/ha",
        ),
        String::new(),
        format!("Charts saved to: {}", output_dir.display()),
    ];
    finish(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CorrelationEntry, GroupStats};
    use pretty_assertions::assert_eq;

    fn wheat_corn() -> GroupedTable {
        GroupedTable {
            title: "Yield by Crop Type (kg/ha)".to_string(),
            group_column: "Crop_Type".to_string(),
            value_column: "Yield(kg/ha)".to_string(),
            measure: "Yield".to_string(),
            aggregation: Aggregation::MeanMedianStd,
            groups: vec![
                GroupStats {
                    label: "Wheat".to_string(),
                    count: 2,
                    mean: Some(150.0),
                    median: Some(150.0),
                    std: Some(70.71),
                },
                GroupStats {
                    label: "Corn".to_string(),
                    count: 1,
                    mean: Some(150.0),
                    median: Some(150.0),
                    std: None,
                },
            ],
        }
    }

    #[test]
    fn test_grouped_table_layout() {
        let text = grouped_table(&wheat_corn());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "Yield by Crop Type (kg/ha):");
        assert!(lines[2].contains("Average Yield"));
        assert!(lines[2].contains("Median Yield"));
        assert!(lines[2].contains("Yield Std Dev"));
        // ascending label order
        assert!(lines[3].starts_with("Corn"));
        assert!(lines[3].trim_end().ends_with("undefined"));
        assert!(lines[4].starts_with("Wheat"));
        assert!(lines[4].contains("150.00"));
        assert!(lines[4].trim_end().ends_with("70.71"));
    }

    #[test]
    fn test_mean_only_table_has_single_column() {
        let mut table = wheat_corn();
        table.aggregation = Aggregation::Mean;
        let text = grouped_table(&table);
        assert!(text.contains("Average Yield"));
        assert!(!text.contains("Median Yield"));
    }

    #[test]
    fn test_correlations_flag_undefined() {
        let ranking = CorrelationRanking {
            target: "Yield(kg/ha)".to_string(),
            entries: vec![
                CorrelationEntry {
                    column: "Profit(USD/ha)".to_string(),
                    value: Some(0.8765),
                },
                CorrelationEntry {
                    column: "Flat".to_string(),
                    value: None,
                },
            ],
        };
        let text = correlations(&[ranking]);
        assert!(text.starts_with(&"=".repeat(50)));
        assert!(text.contains("Correlations with Yield(kg/ha):"));
        assert!(text.contains("  Profit(USD/ha): 0.877"));
        assert!(text.contains("  Flat: undefined"));
    }

    #[test]
    fn test_final_summary() {
        let findings = KeyFindings {
            farm_count: 4,
            region_count: 3,
            crop_type_count: 3,
            practice_count: 3,
            top_yield_crop: Some(("Corn".to_string(), 400.0)),
            top_profit_region: None,
            lowest_emission_practice: Some(("Integrated".to_string(), 40.0)),
        };
        let text = final_summary(&findings, Path::new("outputs"));
        assert!(text.contains("ANALYSIS COMPLETE"));
        assert!(text.contains("- Farms analyzed: 4"));
        assert!(text.contains("- Highest average yield: Corn (400.00 kg/ha)"));
        assert!(text.contains("- Highest average profit: undefined"));
        assert!(text.contains("Charts saved to: outputs"));
    }
}
