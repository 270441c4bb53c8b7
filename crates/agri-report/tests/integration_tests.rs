//! Integration tests for the agricultural report generator.
//!
//! These tests load the CSV fixtures end to end and check the console text,
//! the data behind it and the PNG files a full run leaves behind.

use agri_report::{
    AgriculturalAnalyzer, AnalysisError, CategoricalField, ColumnKind, Dataset, NumericField,
    ReportConfig,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn config_for(filename: &str) -> ReportConfig {
    ReportConfig::builder()
        .input_path(fixtures_path().join(filename))
        .build()
        .expect("Failed to build config")
}

fn load(filename: &str) -> AgriculturalAnalyzer {
    AgriculturalAnalyzer::load(config_for(filename)).expect("Failed to load fixture")
}

/// A fresh directory under the system temp dir, unique to this process.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("agri-report-{}-{}", name, std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    dir
}

fn assert_png(path: &Path) {
    let bytes = fs::read(path).unwrap_or_else(|e| panic!("{} not written: {e}", path.display()));
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "{} is not a PNG",
        path.display()
    );
}

/// All console text except the chart confirmations.
fn console_text(analyzer: &AgriculturalAnalyzer) -> String {
    let matrix = analyzer.correlation_matrix().unwrap();
    [
        analyzer.basic_info().unwrap(),
        analyzer.crop_performance(),
        analyzer.sustainability(),
        analyzer.correlations(&matrix).unwrap(),
        analyzer.final_summary(),
    ]
    .join("\n")
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_classifies_columns() {
    let analyzer = load("agri_small.csv");
    let dataset = analyzer.dataset();

    assert_eq!(dataset.shape(), (10, 13));
    assert_eq!(
        dataset.categorical_columns(),
        &[
            "Farm_ID",
            "Crop_Type",
            "Irrigation_Type",
            "Region",
            "Farming_Practice"
        ]
    );
    assert_eq!(dataset.numeric_columns().len(), 8);
    assert_eq!(dataset.kind_of("Certification_Level"), Some(ColumnKind::Numeric));
}

#[test]
fn test_missing_file_is_load_error() {
    let result = AgriculturalAnalyzer::load(config_for("does_not_exist.csv"));
    let err = result.err().expect("loading a missing file must fail");
    assert!(err.is_load_error());
    assert_eq!(err.error_code(), "LOAD_ERROR");
}

#[test]
fn test_header_only_file_fails_before_analysis() {
    let result = Dataset::load(fixtures_path().join("header_only.csv"));
    let err = result.err().expect("a header-only file must fail");
    assert!(
        matches!(err, AnalysisError::EmptyDataset(_)),
        "unexpected error: {err}"
    );
    assert_eq!(err.error_code(), "EMPTY_DATASET");
}

#[test]
fn test_missing_required_column() {
    let result = AgriculturalAnalyzer::load(config_for("missing_column.csv"));
    match result {
        Err(AnalysisError::MissingColumn { column, expected }) => {
            assert_eq!(column, "Soil_pH");
            assert_eq!(expected, ColumnKind::Numeric);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("a file without Soil_pH must be rejected"),
    }
}

#[test]
fn test_quoted_fields_keep_embedded_commas() {
    let analyzer = load("quoted_fields.csv");
    let crops = analyzer.schema().categorical(CategoricalField::CropType);
    assert_eq!(crops[0].as_deref(), Some("Wheat, Winter"));
    assert_eq!(analyzer.dataset().shape(), (2, 10));
}

// ============================================================================
// Grouped Tables
// ============================================================================

#[test]
fn test_wheat_corn_yield_table() {
    let analyzer = load("wheat_corn.csv");
    let tables = analyzer.crop_performance_tables();
    let yield_by_crop = &tables[0];

    let wheat = yield_by_crop.get("Wheat").unwrap();
    assert_eq!(wheat.mean, Some(150.0));
    assert_eq!(wheat.median, Some(150.0));
    assert_eq!(wheat.std, Some(70.71));

    let corn = yield_by_crop.get("Corn").unwrap();
    assert_eq!(corn.mean, Some(150.0));
    assert_eq!(corn.median, Some(150.0));
    assert_eq!(corn.std, None);

    let text = analyzer.crop_performance();
    let corn_line = text
        .lines()
        .find(|l| l.starts_with("Corn"))
        .expect("Corn row printed");
    assert!(corn_line.trim_end().ends_with("undefined"));
}

#[test]
fn test_group_labels_match_distinct_values() {
    let analyzer = load("agri_small.csv");
    for table in analyzer
        .crop_performance_tables()
        .iter()
        .chain(analyzer.sustainability_tables().iter())
    {
        let group_field = CategoricalField::ALL
            .into_iter()
            .find(|f| f.column_name() == table.group_column)
            .unwrap();
        assert_eq!(
            table.groups.len(),
            analyzer.schema().distinct_count(group_field),
            "{}",
            table.title
        );
    }
}

#[test]
fn test_profit_null_is_skipped() {
    let analyzer = load("agri_small.csv");
    let tables = analyzer.crop_performance_tables();
    let profit_by_crop = &tables[1];
    // F007 (Rice) has no profit
    let rice = profit_by_crop.get("Rice").unwrap();
    assert_eq!(rice.count, 2);
    assert_eq!(rice.mean, Some(980.5));
    assert_eq!(rice.std, None);
}

// ============================================================================
// Correlations
// ============================================================================

#[test]
fn test_correlation_matrix_properties() {
    let analyzer = load("agri_small.csv");
    let matrix = analyzer.correlation_matrix().unwrap();
    assert_eq!(matrix.len(), 8);

    for i in 0..matrix.len() {
        for j in 0..matrix.len() {
            match (matrix.values[i][j], matrix.values[j][i]) {
                (Some(a), Some(b)) => assert!((a - b).abs() < 1e-12),
                (a, b) => assert_eq!(a, b),
            }
        }
    }
    let yield_idx = matrix.index_of(NumericField::Yield.column_name()).unwrap();
    assert_eq!(matrix.values[yield_idx][yield_idx], Some(1.0));

    let constant = matrix.index_of("Certification_Level").unwrap();
    assert!(matrix.values[constant].iter().all(Option::is_none));
}

#[test]
fn test_yield_ranking() {
    let analyzer = load("agri_small.csv");
    let matrix = analyzer.correlation_matrix().unwrap();
    let rankings = analyzer.correlation_rankings(&matrix).unwrap();
    let yield_ranking = &rankings[0];

    assert!(yield_ranking
        .entries
        .iter()
        .all(|e| e.column != "Yield(kg/ha)"));
    let defined: Vec<f64> = yield_ranking.entries.iter().filter_map(|e| e.value).collect();
    assert!(defined.windows(2).all(|w| w[0] >= w[1]));

    let last = yield_ranking.entries.last().unwrap();
    assert_eq!(last.column, "Certification_Level");
    assert_eq!(last.value, None);

    let text = analyzer.correlations(&matrix).unwrap();
    assert!(text.contains("  Certification_Level: undefined"));
}

#[test]
fn test_known_columns_only() {
    let config = ReportConfig::builder()
        .input_path(fixtures_path().join("agri_small.csv"))
        .include_extra_numeric(false)
        .build()
        .unwrap();
    let analyzer = AgriculturalAnalyzer::load(config).unwrap();
    let matrix = analyzer.correlation_matrix().unwrap();
    assert_eq!(
        matrix.columns,
        NumericField::ALL
            .iter()
            .map(|f| f.column_name().to_string())
            .collect::<Vec<_>>()
    );
}

// ============================================================================
// Console Output
// ============================================================================

#[test]
fn test_console_text_is_idempotent() {
    let first = console_text(&load("agri_small.csv"));
    let second = console_text(&load("agri_small.csv"));
    assert_eq!(first, second);
}

#[test]
fn test_console_sections() {
    let analyzer = load("agri_small.csv");
    let text = console_text(&analyzer);

    for header in [
        "AGRICULTURAL DATA ANALYSIS",
        "CROP PERFORMANCE ANALYSIS",
        "SUSTAINABILITY ANALYSIS",
        "CORRELATION ANALYSIS",
        "ANALYSIS COMPLETE",
    ] {
        assert!(text.contains(header), "missing section {header}");
    }
    assert!(text.contains("Dataset Shape: 10 rows, 13 columns"));
    assert!(text.contains("First 5 rows:"));
    assert!(text.contains("Yield by Crop Type (kg/ha):"));
    assert!(text.contains("Average Carbon Emissions by Farming Practice (kg CO2eq/ha):"));
    assert!(text.contains("Correlations with Yield(kg/ha):"));
    assert!(text.contains("Correlations with Profit(USD/ha):"));
}

#[test]
fn test_key_findings() {
    let findings = load("agri_small.csv").key_findings();
    assert_eq!(findings.farm_count, 10);
    assert_eq!(findings.region_count, 4);
    assert_eq!(findings.crop_type_count, 4);
    assert_eq!(findings.practice_count, 3);
    assert_eq!(findings.top_yield_crop, Some(("Corn".to_string(), 5466.67)));
    assert_eq!(
        findings.top_profit_region,
        Some(("South".to_string(), 1216.67))
    );
    assert_eq!(
        findings.lowest_emission_practice,
        Some(("Organic".to_string(), 213.77))
    );
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_unwritable_output_dir_is_render_error() {
    let blocker = std::env::temp_dir().join(format!("agri-report-it-{}", std::process::id()));
    std::fs::write(&blocker, b"not a directory").unwrap();

    let config = ReportConfig::builder()
        .input_path(fixtures_path().join("wheat_corn.csv"))
        .output_dir(blocker.join("outputs"))
        .build()
        .unwrap();
    let analyzer = AgriculturalAnalyzer::load(config).unwrap();
    let matrix = analyzer.correlation_matrix().unwrap();
    let err = analyzer.create_visualizations(&matrix).unwrap_err();
    assert!(matches!(err, AnalysisError::Render(_)));

    std::fs::remove_file(&blocker).unwrap();
}

#[test]
fn test_full_run_writes_both_charts() {
    let dir = scratch_dir("render");
    let config = ReportConfig::builder()
        .input_path(fixtures_path().join("agri_small.csv"))
        .output_dir(dir.join("outputs"))
        .build()
        .unwrap();
    let analyzer = AgriculturalAnalyzer::load(config).unwrap();

    let mut out = Vec::new();
    let charts = analyzer.run_full_analysis(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_png(&charts.overview);
    assert_png(&charts.heatmap);
    assert!(text.contains("Saved main visualization to"));
    assert!(text.contains("Saved correlation heatmap to"));
    assert!(text.contains("ANALYSIS COMPLETE"));

    // a second run overwrites the same two files
    let mut again = Vec::new();
    let rerun = analyzer.run_full_analysis(&mut again).unwrap();
    assert_eq!(rerun.overview, charts.overview);
    assert_eq!(rerun.heatmap, charts.heatmap);
    assert_png(&rerun.heatmap);
    assert_eq!(fs::read_dir(dir.join("outputs")).unwrap().count(), 2);

    fs::remove_dir_all(&dir).unwrap();
}
