//! Fitness over generations
//!
//! Every statistics series in the results directory is overlaid on two panels:
//! minimum fitness on the left, average fitness on the right. The generation with
//! the lowest minimum of each run is marked on the left panel. An empty selection
//! still produces the two panels.

use crate::common::constants::{FigurePaths, STATS_FIGURE};
use crate::common::plots::{self, Canvas, Margins, PlotError, TICK_COUNT};
use crate::common::style::Style;
use crate::figures::FigureError;
use crate::parsing::{load_statistics, select_results, ResultKind, StatisticsSeries};
use log::info;
use plotters::prelude::*;
use std::path::Path;

type Result<T> = core::result::Result<T, PlotError>;

/// Series line width in points
const LINE_WIDTH: f64 = 1.5;

/// Best-generation marker radius in points
const MARKER_RADIUS: f64 = 6.0;

/// Fraction of the data span left empty around the curves
const DATA_MARGIN: f64 = 0.05;

/// Which column of a statistics table a panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Minimum,
    Average,
}

impl Column {
    pub fn values<'a>(&self, series: &'a StatisticsSeries) -> &'a [f64] {
        match self {
            Column::Minimum => &series.minimum,
            Column::Average => &series.average,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Column::Minimum => "Min",
            Column::Average => "Avg",
        }
    }

    /// Only the left panel carries a y axis label
    pub fn y_label(&self) -> Option<&'static str> {
        match self {
            Column::Minimum => Some("Fitness"),
            Column::Average => None,
        }
    }
}

/// Panels from left to right
pub const PANELS: [Column; 2] = [Column::Minimum, Column::Average];

/// Padded x range covering the longest series
pub fn generation_range(series: &[StatisticsSeries]) -> (f64, f64) {
    let last = series
        .iter()
        .map(|s| s.generations().saturating_sub(1))
        .max()
        .unwrap_or(0);
    plots::padded_range(0.0, last as f64, DATA_MARGIN)
}

/// Padded y range covering the finite values in `column` of every series
pub fn value_range(series: &[StatisticsSeries], column: Column) -> (f64, f64) {
    let values = || {
        series
            .iter()
            .flat_map(|s| column.values(s).iter().copied())
            .filter(|value| value.is_finite())
    };
    let min = values().fold(f64::INFINITY, f64::min);
    let max = values().fold(f64::NEG_INFINITY, f64::max);

    if min > max {
        return plots::padded_range(0.0, 0.0, DATA_MARGIN);
    }
    plots::padded_range(min, max, DATA_MARGIN)
}

/// Draws every series on two side by side panels of `canvas`. With no series the
/// panels are drawn empty.
pub fn draw_statistics(
    canvas: &Canvas<'_>,
    series: &[StatisticsSeries],
    style: &Style,
) -> Result<()> {
    let panels = canvas.split_evenly((1, PANELS.len()));
    let (x_min, x_max) = generation_range(series);
    let x_ticks = plots::tick_values((x_min, x_max), TICK_COUNT);
    let line_width = style.px(LINE_WIDTH) as u32;
    let format_tick = |value: &f64| style.format_tick(*value);

    for (column, panel) in PANELS.iter().zip(panels.iter()) {
        let margins = Margins::subplot(panel);
        let (y_min, y_max) = value_range(series, *column);
        let y_ticks = plots::tick_values((y_min, y_max), TICK_COUNT);
        let y_labels: Vec<String> = y_ticks.iter().map(|y| style.format_tick(*y)).collect();

        let mut chart = ChartBuilder::on(panel)
            .caption(column.title(), style.axes_title_font())
            .margin_left(margins.left / 4)
            .margin_right(margins.right / 2)
            .margin_top(margins.top / 2)
            .margin_bottom(margins.bottom / 4)
            .x_label_area_size(plots::x_label_area_size(style, true))
            .y_label_area_size(plots::y_label_area_size(
                style,
                &y_labels,
                column.y_label().is_some(),
            )?)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

        let mut mesh = chart.configure_mesh();
        mesh.x_desc("Generation")
            .axis_desc_style(style.axis_label_font())
            .label_style(style.tick_font())
            .x_labels(TICK_COUNT)
            .y_labels(TICK_COUNT)
            .x_label_formatter(&format_tick)
            .y_label_formatter(&format_tick)
            .set_all_tick_mark_size(style.mesh_tick_size())
            .bold_line_style(BLACK.mix(0.15))
            .max_light_lines(0);

        if let Some(y_label) = column.y_label() {
            mesh.y_desc(y_label);
        }
        if !style.grid {
            mesh.disable_mesh();
        }

        mesh.draw().map_err(|e| PlotError::Drawing(e.to_string()))?;
        plots::draw_frame(&chart, (x_min, x_max), (y_min, y_max))?;
        plots::draw_inward_ticks(canvas, &chart, (x_min, y_min), &x_ticks, &y_ticks, style)?;

        for (index, run) in series.iter().enumerate() {
            // Non-finite values have no position on the axes
            let points = column
                .values(run)
                .iter()
                .enumerate()
                .filter(|(_, value)| value.is_finite())
                .map(|(generation, value)| (generation as f64, *value));

            chart
                .draw_series(LineSeries::new(
                    points,
                    style.color(index).stroke_width(line_width),
                ))
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }

        if *column == Column::Minimum {
            let radius = style.points_to_pixels(MARKER_RADIUS);
            for (index, run) in series.iter().enumerate() {
                if let Some((generation, value)) = run.best() {
                    plots::draw_marker(
                        canvas,
                        style.marker(index),
                        chart.backend_coord(&(generation as f64, value)),
                        radius,
                        &style.color(index),
                    )?;
                }
            }
        }
    }

    Ok(())
}

/// Draws every series and saves the figure as a PNG at `output_path`
pub fn render_statistics(
    series: &[StatisticsSeries],
    style: &Style,
    output_path: &Path,
) -> Result<()> {
    let canvas = plots::create_canvas(output_path, style)?;
    draw_statistics(&canvas, series, style)?;
    plots::present(&canvas)?;

    info!(
        "Wrote {} statistics series to {}",
        series.len(),
        output_path.display()
    );
    Ok(())
}

/// Loads every statistics series from the results directory and renders `stats.png`
pub fn generate_statistics_figure(
    paths: &FigurePaths,
    style: &Style,
) -> core::result::Result<Vec<StatisticsSeries>, FigureError> {
    let series = select_results(&paths.results_dir, ResultKind::Statistics)?
        .iter()
        .map(|file| load_statistics(file))
        .collect::<core::result::Result<Vec<_>, _>>()?;

    render_statistics(&series, style, &paths.figure(STATS_FIGURE))?;
    Ok(series)
}
