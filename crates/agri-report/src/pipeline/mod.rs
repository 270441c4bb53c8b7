//! The report run: load once, then each stage in order.
//!
//! [`AgriculturalAnalyzer`] owns the validated dataset and exposes every
//! stage both as data (tables, matrices) and as console text.
//! [`AgriculturalAnalyzer::run_full_analysis`] streams the sections to a
//! writer as they are produced and stops at the first failing stage.

mod stage;

pub use stage::ReportStage;

use crate::analysis::{
    key_findings, CorrelationAnalyzer, GroupedAggregator, CROP_PERFORMANCE, SUSTAINABILITY,
};
use crate::config::ReportConfig;
use crate::dataset::{AgriSchema, Dataset, NumericField};
use crate::error::{AnalysisError, Result};
use crate::profiler::DataProfiler;
use crate::reporting;
use crate::types::{
    CorrelationMatrix, CorrelationRanking, DatasetSummary, GroupedTable, KeyFindings,
};
use crate::visualization::ChartRenderer;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

/// Targets ranked in the correlation section, in print order.
const RANKED_TARGETS: [NumericField; 2] = [NumericField::Yield, NumericField::Profit];

/// Chart images written by the visualization stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCharts {
    pub overview: PathBuf,
    pub heatmap: PathBuf,
}

/// A loaded, schema-checked dataset and the configuration of the run.
pub struct AgriculturalAnalyzer {
    config: ReportConfig,
    dataset: Dataset,
    schema: AgriSchema,
}

static_assertions::assert_impl_all!(AgriculturalAnalyzer: Send, Sync);

impl AgriculturalAnalyzer {
    /// Validate `config`, read its input file and resolve the schema.
    ///
    /// Missing files, unreadable CSV, an empty dataset and schema
    /// violations all fail here, before any report output.
    pub fn load(config: ReportConfig) -> Result<Self> {
        config.validate()?;
        info!("Starting stage: {}", ReportStage::Loading);
        let dataset = Dataset::load(&config.input_path)?;
        Self::from_dataset(config, dataset)
    }

    /// Build from an already loaded dataset.
    pub fn from_dataset(config: ReportConfig, dataset: Dataset) -> Result<Self> {
        let schema = AgriSchema::resolve(&dataset)?;
        Ok(Self {
            config,
            dataset,
            schema,
        })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn schema(&self) -> &AgriSchema {
        &self.schema
    }

    // ==================== Summary ====================

    pub fn summary(&self) -> Result<DatasetSummary> {
        DataProfiler::summarize(&self.dataset)
    }

    pub fn basic_info(&self) -> Result<String> {
        let summary = self.summary()?;
        let preview = self.dataset.preview(self.config.preview_rows);
        Ok(reporting::basic_info(&summary, &preview))
    }

    // ==================== Grouped tables ====================

    pub fn crop_performance_tables(&self) -> Vec<GroupedTable> {
        GroupedAggregator::aggregate_all(&self.schema, &CROP_PERFORMANCE)
    }

    pub fn crop_performance(&self) -> String {
        reporting::crop_performance(&self.crop_performance_tables())
    }

    pub fn sustainability_tables(&self) -> Vec<GroupedTable> {
        GroupedAggregator::aggregate_all(&self.schema, &SUSTAINABILITY)
    }

    pub fn sustainability(&self) -> String {
        reporting::sustainability(&self.sustainability_tables())
    }

    // ==================== Correlations ====================

    pub fn correlation_matrix(&self) -> Result<CorrelationMatrix> {
        CorrelationAnalyzer::from_dataset(&self.dataset, self.config.include_extra_numeric)
    }

    /// Rankings against Yield, then Profit.
    pub fn correlation_rankings(&self, matrix: &CorrelationMatrix) -> Result<Vec<CorrelationRanking>> {
        RANKED_TARGETS
            .iter()
            .map(|target| CorrelationAnalyzer::rank(matrix, target.column_name()))
            .collect()
    }

    pub fn correlations(&self, matrix: &CorrelationMatrix) -> Result<String> {
        let rankings = self.correlation_rankings(matrix)?;
        Ok(reporting::correlations(&rankings))
    }

    // ==================== Charts ====================

    /// Write both chart images; the heatmap draws `matrix`.
    pub fn create_visualizations(&self, matrix: &CorrelationMatrix) -> Result<RenderedCharts> {
        let renderer = ChartRenderer::new(&self.config);
        let overview = renderer.render_overview(&self.schema)?;
        let heatmap = renderer.render_heatmap(matrix)?;
        Ok(RenderedCharts { overview, heatmap })
    }

    // ==================== Final summary ====================

    pub fn key_findings(&self) -> KeyFindings {
        key_findings(&self.schema)
    }

    pub fn final_summary(&self) -> String {
        reporting::final_summary(&self.key_findings(), &self.config.output_dir)
    }

    /// Run every stage after loading, writing each section to `out` as soon
    /// as it is ready.
    pub fn run_full_analysis<W: Write>(&self, out: &mut W) -> Result<RenderedCharts> {
        let start = Instant::now();
        info!("Analyzing {}", self.dataset.source());

        let mut run = RunState::default();
        let mut stage = ReportStage::Loading.next();
        while let Some(current) = stage {
            info!("Starting stage: {}", current);
            if let Err(e) = self.run_stage(current, &mut run, out) {
                error!("Stage '{}' failed: {}", current, e);
                return Err(e);
            }
            out.flush()?;
            stage = current.next();
        }

        info!("Report finished in {:.2?}", start.elapsed());
        run.charts.ok_or_else(|| {
            AnalysisError::Render("visualization stage produced no charts".to_string())
        })
    }

    fn run_stage<W: Write>(&self, stage: ReportStage, run: &mut RunState, out: &mut W) -> Result<()> {
        match stage {
            ReportStage::Loading => {}
            ReportStage::Summary => writeln!(out, "{}", self.basic_info()?)?,
            ReportStage::CropPerformance => writeln!(out, "{}", self.crop_performance())?,
            ReportStage::Sustainability => writeln!(out, "{}", self.sustainability())?,
            ReportStage::Correlations => {
                let matrix = self.correlation_matrix()?;
                writeln!(out, "{}", self.correlations(&matrix)?)?;
                run.matrix = Some(matrix);
            }
            ReportStage::Visualizations => {
                write!(out, "{}", reporting::visualizations_header())?;
                out.flush()?;
                let matrix = match run.matrix.take() {
                    Some(matrix) => matrix,
                    None => self.correlation_matrix()?,
                };
                let charts = self.create_visualizations(&matrix)?;
                write!(out, "{}", reporting::chart_saved("main visualization", &charts.overview))?;
                writeln!(out, "{}", reporting::chart_saved("correlation heatmap", &charts.heatmap))?;
                run.charts = Some(charts);
            }
            ReportStage::Complete => write!(out, "{}", self.final_summary())?,
        }
        Ok(())
    }
}

/// Results carried from one stage to a later one.
#[derive(Default)]
struct RunState {
    matrix: Option<CorrelationMatrix>,
    charts: Option<RenderedCharts>,
}
