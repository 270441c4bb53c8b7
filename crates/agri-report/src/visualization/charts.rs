//! Drawing with plotters. Every backend error becomes a render error.

use super::colormap::{annotation_color, diverging_color, DEFAULT_BAR, UNDEFINED_CELL};
use super::series::{BarSeries, HistogramBins, OverviewData};
use crate::error::{AnalysisError, Result};
use crate::types::CorrelationMatrix;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::path::Path;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const FONT: &str = "sans-serif";
const COLORBAR_WIDTH: u32 = 140;
const COLORBAR_STEPS: usize = 200;

const AXIS_LABEL_GAP: i32 = 8;

/// Upper bound of a segmented axis with exactly `count` slots.
///
/// plotters gives `a..b` one slot per value in `a..=b`.
fn last_slot(count: u32) -> u32 {
    count.saturating_sub(1)
}

/// Right (or top) edge of slot `index` on an axis of `count` slots.
fn slot_end(index: u32, count: u32) -> SegmentValue<u32> {
    if index + 1 >= count {
        SegmentValue::Last
    } else {
        SegmentValue::Exact(index + 1)
    }
}

fn segment_label(labels: &[String], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

/// Caption-only panel for a chart with nothing to plot.
fn draw_empty_panel(area: &Area<'_>, title: &str) -> Result<()> {
    area.titled(title, (FONT, 24)).map_err(AnalysisError::render)?;
    Ok(())
}

/// 2x2 grid: yield by crop, profit by region, emissions by practice and the
/// Soil pH histogram.
pub(crate) fn draw_overview(path: &Path, size: (u32, u32), data: &OverviewData) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(AnalysisError::render)?;
    let root = root
        .titled("Agricultural Data Analysis", (FONT, 40))
        .map_err(AnalysisError::render)?;

    let panels = root.split_evenly((2, 2));
    draw_bar_chart(&panels[0], &data.crop_yield)?;
    draw_bar_chart(&panels[1], &data.region_profit)?;
    draw_bar_chart(&panels[2], &data.practice_carbon)?;
    match &data.soil_ph {
        Some(bins) => draw_histogram(&panels[3], bins)?,
        None => draw_empty_panel(&panels[3], "Distribution of Soil pH")?,
    }

    root.present().map_err(AnalysisError::render)?;
    Ok(())
}

fn draw_bar_chart(area: &Area<'_>, series: &BarSeries) -> Result<()> {
    if series.is_empty() {
        return draw_empty_panel(area, &series.title);
    }

    let (y_min, y_max) = series.value_range();
    let bars = series.labels.len() as u32;
    let mut chart = ChartBuilder::on(area)
        .caption(&series.title, (FONT, 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d((0u32..last_slot(bars)).into_segmented(), y_min..y_max)
        .map_err(AnalysisError::render)?;

    let labels = &series.labels;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc(series.y_desc.as_str())
        .x_labels(labels.len())
        .x_label_formatter(&|v| segment_label(labels, v))
        .x_label_style((FONT, 15))
        .y_label_style((FONT, 14))
        .draw()
        .map_err(AnalysisError::render)?;

    chart
        .draw_series(series.values.iter().enumerate().map(|(i, value)| {
            let i = i as u32;
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (slot_end(i, bars), *value)],
                series.color(i as usize).filled(),
            );
            bar.set_margin(0, 0, 8, 8);
            bar
        }))
        .map_err(AnalysisError::render)?;
    Ok(())
}

fn draw_histogram(area: &Area<'_>, bins: &HistogramBins) -> Result<()> {
    let (lo, hi) = bins.range();
    let mut chart = ChartBuilder::on(area)
        .caption("Distribution of Soil pH", (FONT, 24))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(lo..hi, 0u32..bins.max_count() + 1)
        .map_err(AnalysisError::render)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Soil pH")
        .y_desc("Frequency")
        .draw()
        .map_err(AnalysisError::render)?;

    chart
        .draw_series(bins.bars().map(|(left, right, count)| {
            Rectangle::new([(left, 0), (right, count)], DEFAULT_BAR.mix(0.7).filled())
        }))
        .map_err(AnalysisError::render)?;
    chart
        .draw_series(bins.bars().map(|(left, right, count)| {
            Rectangle::new([(left, 0), (right, count)], BLACK.stroke_width(1))
        }))
        .map_err(AnalysisError::render)?;
    Ok(())
}

/// Lower-triangle heatmap of the correlation matrix with a color bar.
pub(crate) fn draw_heatmap(path: &Path, size: (u32, u32), matrix: &CorrelationMatrix) -> Result<()> {
    let canvas = BitMapBackend::new(path, size).into_drawing_area();
    canvas.fill(&WHITE).map_err(AnalysisError::render)?;
    let root = canvas
        .titled("Correlation Matrix of Numerical Variables", (FONT, 32))
        .map_err(AnalysisError::render)?;

    if !matrix.is_empty() {
        let (plot_area, bar_area) = root.split_horizontally(size.0.saturating_sub(COLORBAR_WIDTH));
        draw_cells(&canvas, &plot_area, matrix)?;
        draw_colorbar(&bar_area)?;
    }

    root.present().map_err(AnalysisError::render)?;
    Ok(())
}

/// Cells and axis labels. Column labels are drawn on `canvas`, hanging
/// below the grid, since mesh labels are centered on their tick.
fn draw_cells(canvas: &Area<'_>, area: &Area<'_>, matrix: &CorrelationMatrix) -> Result<()> {
    let n = matrix.len() as u32;
    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(240)
        .y_label_area_size(240)
        .build_cartesian_2d(
            (0u32..last_slot(n)).into_segmented(),
            (0u32..last_slot(n)).into_segmented(),
        )
        .map_err(AnalysisError::render)?;

    let labels = &matrix.columns;
    // rows are drawn top to bottom, so y = n - 1 - row
    let row_label = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(y) if *y < n => labels
            .get((n - 1 - y) as usize)
            .cloned()
            .unwrap_or_default(),
        _ => String::new(),
    };
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n as usize)
        .y_labels(n as usize)
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&row_label)
        .y_label_style((FONT, 14))
        .draw()
        .map_err(AnalysisError::render)?;

    let column_style = (FONT, 14)
        .into_font()
        .transform(FontTransform::Rotate90)
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    for (col, label) in labels.iter().enumerate() {
        let (x, y) = chart.backend_coord(&(
            SegmentValue::CenterOf(col as u32),
            SegmentValue::Exact(0),
        ));
        canvas
            .draw(&Text::new(
                label.clone(),
                (x, y + AXIS_LABEL_GAP),
                column_style.clone(),
            ))
            .map_err(AnalysisError::render)?;
    }

    let cells = heatmap_cells(matrix);
    chart
        .draw_series(cells.iter().map(|cell| {
            let y = n - 1 - cell.row;
            let fill = cell.value.map_or(UNDEFINED_CELL, diverging_color);
            Rectangle::new(
                [
                    (SegmentValue::Exact(cell.col), SegmentValue::Exact(y)),
                    (slot_end(cell.col, n), slot_end(y, n)),
                ],
                fill.filled(),
            )
        }))
        .map_err(AnalysisError::render)?;

    chart
        .draw_series(cells.iter().map(|cell| {
            let y = n - 1 - cell.row;
            let color = cell.value.map_or(BLACK, annotation_color);
            let style = (FONT, 16)
                .into_font()
                .color(&color)
                .pos(Pos::new(HPos::Center, VPos::Center));
            Text::new(
                cell.annotation(),
                (SegmentValue::CenterOf(cell.col), SegmentValue::CenterOf(y)),
                style,
            )
        }))
        .map_err(AnalysisError::render)?;
    Ok(())
}

fn draw_colorbar(area: &Area<'_>) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .margin_top(40)
        .margin_bottom(200)
        .margin_right(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..1f64, -1f64..1f64)
        .map_err(AnalysisError::render)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(5)
        .y_label_formatter(&|v| format!("{v:.1}"))
        .y_label_style((FONT, 16))
        .draw()
        .map_err(AnalysisError::render)?;

    let step = 2.0 / COLORBAR_STEPS as f64;
    chart
        .draw_series((0..COLORBAR_STEPS).map(|k| {
            let lo = -1.0 + step * k as f64;
            let hi = lo + step;
            Rectangle::new(
                [(0.0, lo), (1.0, hi)],
                diverging_color((lo + hi) / 2.0).filled(),
            )
        }))
        .map_err(AnalysisError::render)?;
    Ok(())
}

/// One drawn heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HeatmapCell {
    pub row: u32,
    pub col: u32,
    pub value: Option<f64>,
}

impl HeatmapCell {
    pub fn annotation(&self) -> String {
        match self.value {
            Some(v) => format!("{v:.2}"),
            None => "n/a".to_string(),
        }
    }
}

/// Cells strictly below the diagonal; the diagonal and upper triangle are masked.
pub(crate) fn heatmap_cells(matrix: &CorrelationMatrix) -> Vec<HeatmapCell> {
    let mut cells = Vec::new();
    for (row, values) in matrix.values.iter().enumerate() {
        for (col, value) in values.iter().enumerate().take(row) {
            cells.push(HeatmapCell {
                row: row as u32,
                col: col as u32,
                value: *value,
            });
        }
    }
    cells
}
