//! PNG chart rendering via the `plotters` bitmap backend
//!
//! Renders the chart data of one analysis run into a single PNG file,
//! with multiple charts stacked as vertical panels. Fixed 1200 px width;
//! the height grows with the panel count.

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

use crate::chart::{BarAlign, Chart, SeriesStyle};

const WIDTH_PX: u32 = 1200;
const PANEL_HEIGHT_PX: u32 = 400;
const MIN_HEIGHT_PX: u32 = 800;

/// Errors that can occur during chart rendering
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Render charts into a PNG file, one stacked panel per chart.
pub fn render_png(charts: &[Chart], output_path: &Path) -> Result<()> {
    validate(charts)?;

    let height = (PANEL_HEIGHT_PX * charts.len() as u32).max(MIN_HEIGHT_PX);
    let root = BitMapBackend::new(output_path, (WIDTH_PX, height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let panels = root.split_evenly((charts.len(), 1));
    for (chart, panel) in charts.iter().zip(panels.iter()) {
        draw_panel(chart, panel)?;
    }

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

fn validate(charts: &[Chart]) -> Result<()> {
    if charts.is_empty() {
        return Err(PlotError::InvalidData("no charts to render".to_string()));
    }
    for chart in charts {
        let (x_min, x_max) = chart.x_bounds;
        if !x_min.is_finite() || !x_max.is_finite() {
            return Err(PlotError::InvalidData(format!(
                "non-finite x bounds {x_min}..{x_max}"
            )));
        }
        if let Some((y_min, y_max)) = chart.y_bounds {
            if !y_min.is_finite() || !y_max.is_finite() {
                return Err(PlotError::InvalidData(format!(
                    "non-finite y bounds {y_min}..{y_max}"
                )));
            }
        }
    }
    Ok(())
}

/// Widen a degenerate range so the axis always has extent.
fn padded(bounds: (f64, f64)) -> (f64, f64) {
    let (min, max) = bounds;
    if min < max {
        (min, max)
    } else {
        (min, min + 1.0)
    }
}

/// Number of x-axis labels for a requested tick step, kept within what a
/// 1200 px panel can fit.
fn tick_count(bounds: (f64, f64), step: f64) -> usize {
    let span = (bounds.1 - bounds.0) / step;
    (span.round() as usize + 1).clamp(2, 16)
}

fn draw_panel(chart: &Chart, area: &DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()> {
    let (x_min, x_max) = padded(chart.x_bounds);
    let (y_min, y_max) = match chart.y_bounds {
        Some(bounds) => padded(bounds),
        // Headroom above the tallest point when the data sets the range.
        None => (0.0, (chart.max_y() * 1.05).max(1.0)),
    };

    let mut context = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    let mut mesh = context.configure_mesh();
    mesh.x_desc(&chart.x_label)
        .y_desc(&chart.y_label)
        .label_style(("sans-serif", 20))
        .axis_desc_style(("sans-serif", 25));
    if let Some(step) = chart.x_tick_step {
        mesh.x_labels(tick_count(chart.x_bounds, step));
    }
    mesh.draw().map_err(|e| PlotError::Drawing(e.to_string()))?;

    let mut has_labels = false;
    for series in &chart.series {
        has_labels |= series.label.is_some();
        match series.style {
            SeriesStyle::Bars { width, align } => {
                let annotations = context
                    .draw_series(series.points.iter().map(|&(x, y)| {
                        let x0 = match align {
                            BarAlign::Edge => x,
                            BarAlign::Center => x - width / 2.0,
                        };
                        Rectangle::new([(x0, 0.0), (x0 + width, y)], BLUE.filled())
                    }))
                    .map_err(|e| PlotError::Drawing(e.to_string()))?;
                if let Some(label) = &series.label {
                    annotations.label(label).legend(|(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 10, y + 5)], BLUE.filled())
                    });
                }
            }
            SeriesStyle::Line => {
                let annotations = context
                    .draw_series(LineSeries::new(series.points.iter().copied(), &BLUE))
                    .map_err(|e| PlotError::Drawing(e.to_string()))?;
                if let Some(label) = &series.label {
                    annotations.label(label).legend(|(x, y)| {
                        PathElement::new(vec![(x, y), (x + 10, y)], BLUE)
                    });
                }
                context
                    .draw_series(
                        series
                            .points
                            .iter()
                            .map(|&point| Cross::new(point, 4, BLUE.filled())),
                    )
                    .map_err(|e| PlotError::Drawing(e.to_string()))?;
            }
        }
    }

    if has_labels {
        context
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", 20))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    Ok(())
}
