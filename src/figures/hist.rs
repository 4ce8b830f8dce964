//! Letter frequency stem chart
//!
//! One stem per symbol of the histogram table, in file order, with no baseline
//! and no grid.

use crate::common::constants::{FigurePaths, HISTOGRAM_FIGURE};
use crate::common::plots::{self, Canvas, Margins, PlotError, TICK_COUNT};
use crate::common::style::Style;
use crate::figures::FigureError;
use crate::parsing::{load_histogram, Histogram};
use log::info;
use plotters::prelude::*;
use std::path::Path;

type Result<T> = core::result::Result<T, PlotError>;

/// Stem line width in points
const STEM_WIDTH: f64 = 8.0;

/// Radius of the stem heads in points
const HEAD_RADIUS: f64 = 4.0;

/// Fraction of the data span left empty above and below the stems
const Y_MARGIN: f64 = 0.05;

/// Value range of the y axis; always includes zero so stems start at the axis origin.
pub fn count_range(histogram: &Histogram) -> (f64, f64) {
    let min = histogram.counts.iter().copied().min().unwrap_or(0).min(0);
    let max = histogram.counts.iter().copied().max().unwrap_or(0).max(0);
    plots::padded_range(min as f64, max as f64, Y_MARGIN)
}

/// Draws `histogram` as a stem chart on `canvas`
pub fn draw_histogram(canvas: &Canvas<'_>, histogram: &Histogram, style: &Style) -> Result<()> {
    if histogram.is_empty() {
        return Err(PlotError::InvalidData(
            "Histogram cannot be empty".to_string(),
        ));
    }

    let margins = Margins::subplot(canvas);
    let color = style.color(0);

    let (x_min, x_max) = (-0.5, histogram.len() as f64 - 0.5);
    let (y_min, y_max) = count_range(histogram);
    let y_ticks = plots::tick_values((y_min, y_max), TICK_COUNT);
    let y_labels: Vec<String> = y_ticks.iter().map(|y| style.format_tick(*y)).collect();

    let mut chart = ChartBuilder::on(canvas)
        .margin_left(margins.left / 2)
        .margin_right(margins.right)
        .margin_top(margins.top)
        .margin_bottom(margins.bottom / 2)
        .x_label_area_size(plots::x_label_area_size(style, false))
        .y_label_area_size(plots::y_label_area_size(style, &y_labels, false)?)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    // Category labels are drawn below, one per stem
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(TICK_COUNT)
        .y_label_formatter(&|y| style.format_tick(*y))
        .y_label_style(style.tick_font())
        .set_all_tick_mark_size(style.mesh_tick_size())
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    plots::draw_frame(&chart, (x_min, x_max), (y_min, y_max))?;
    plots::draw_inward_ticks(canvas, &chart, (x_min, y_min), &[], &y_ticks, style)?;

    let stem_style = color.stroke_width(style.px(STEM_WIDTH) as u32);
    chart
        .draw_series(histogram.iter().enumerate().map(|(index, (_, count))| {
            PathElement::new(
                vec![(index as f64, 0.0), (index as f64, count as f64)],
                stem_style,
            )
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let head_radius = style.px(HEAD_RADIUS);
    chart
        .draw_series(histogram.iter().enumerate().map(|(index, (_, count))| {
            Circle::new((index as f64, count as f64), head_radius, color.filled())
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let label_offset = style.label_gap() as i32 + style.px(style.small_size) / 2;
    for (index, (symbol, _)) in histogram.iter().enumerate() {
        let (x, y) = chart.backend_coord(&(index as f64, y_min));
        plots::draw_centered_text(
            canvas,
            symbol,
            (x, y + label_offset),
            style.tick_font(),
            &BLACK,
        )?;
    }

    Ok(())
}

/// Draws `histogram` and saves the figure as a PNG at `output_path`
pub fn render_histogram(histogram: &Histogram, style: &Style, output_path: &Path) -> Result<()> {
    if histogram.is_empty() {
        return Err(PlotError::InvalidData(
            "Histogram cannot be empty".to_string(),
        ));
    }

    let canvas = plots::create_canvas(output_path, style)?;
    draw_histogram(&canvas, histogram, style)?;
    plots::present(&canvas)?;

    info!(
        "Wrote histogram of {} symbols to {}",
        histogram.len(),
        output_path.display()
    );
    Ok(())
}

/// Loads the histogram table from `paths` and renders `hist.png`
pub fn generate_histogram_figure(
    paths: &FigurePaths,
    style: &Style,
) -> core::result::Result<Histogram, FigureError> {
    let histogram = load_histogram(&paths.histogram_file)?;
    render_histogram(&histogram, style, &paths.figure(HISTOGRAM_FIGURE))?;
    Ok(histogram)
}
