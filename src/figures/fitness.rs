//! Finger-travel diagram explaining the fitness function
//!
//! Draws a QWERTY keyboard with arrows from the home row towards the keys each
//! finger reaches: straight up and down for the outer fingers, and fanned out
//! towards the middle columns for the two index fingers.

use crate::common::constants::{FigurePaths, FITNESS_FIGURE};
use crate::common::plots::{self, Margins, PlotError};
use crate::common::style::Style;
use crate::figures::FigureError;
use derive_new::new;
use log::info;
use plotters::prelude::*;
use std::path::Path;

type Result<T> = core::result::Result<T, PlotError>;

/// Keyboard rows, top row first
pub const QWERTY: [&str; 3] = ["qwertyuiop", "asdfghjkl;", "zxcvbnm,./"];

/// Row index (counted from the bottom) of the home row
const HOME_ROW: usize = 1;

/// Home row columns of the left and right index fingers
const INDEX_COLUMNS: (usize, usize) = (3, 6);

const X_RANGE: (f64, f64) = (0.0, 10.0);
const Y_RANGE: (f64, f64) = (-1.0, 3.0);

const ARROW_COLOR: RGBColor = RGBColor(0xce, 0xca, 0xcd);
const ARROW_WIDTH: f64 = 3.0;
const ARROW_HEAD_LENGTH: f64 = 10.0;
const GLYPH_SIZE: f64 = 42.0;

/// A key label at its grid position
#[derive(Debug, Clone, PartialEq, new)]
pub struct KeyGlyph {
    pub letter: char,
    /// (column, row) with row 0 at the bottom
    pub position: (f64, f64),
    /// Outer home row keys are drawn in a distinct colour
    pub highlighted: bool,
}

/// Finger movement from a home row key towards `tip`
#[derive(Debug, Clone, PartialEq, new)]
pub struct Arrow {
    pub tail: (f64, f64),
    pub tip: (f64, f64),
}

/// Geometry of the diagram, independent of how it is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessDiagram {
    pub keys: Vec<KeyGlyph>,
    pub arrows: Vec<Arrow>,
}

fn is_outer_home_key(column: usize, row: usize) -> bool {
    row == HOME_ROW && (column <= INDEX_COLUMNS.0 || column >= INDEX_COLUMNS.1)
}

impl FitnessDiagram {
    /// Lays out `rows` (top row first) and computes every finger-travel arrow.
    pub fn for_layout(rows: &[&str]) -> Self {
        let mut keys = Vec::new();
        let mut arrows = Vec::new();

        for (y, row) in rows.iter().rev().enumerate() {
            for (x, letter) in row.chars().enumerate() {
                let position = (x as f64, y as f64);

                if is_outer_home_key(x, y) {
                    arrows.push(Arrow::new(position, (x as f64, 2.0 - 0.25)));
                    arrows.push(Arrow::new(position, (x as f64, 0.25)));
                }

                let reach = if y != HOME_ROW {
                    None
                } else if x == INDEX_COLUMNS.0 {
                    Some(1.0 - 0.25)
                } else if x == INDEX_COLUMNS.1 {
                    Some(-1.0 + 0.25)
                } else {
                    None
                };
                if let Some(reach) = reach {
                    for target_row in 0..3 {
                        let target_row = target_row as f64;
                        let tip = (x as f64 + reach, target_row - (target_row - 1.0) * 0.25);
                        arrows.push(Arrow::new(position, tip));
                    }
                }

                keys.push(KeyGlyph::new(letter, position, is_outer_home_key(x, y)));
            }
        }

        Self { keys, arrows }
    }
}

impl Default for FitnessDiagram {
    fn default() -> Self {
        Self::for_layout(&QWERTY)
    }
}

/// Draws `diagram` and saves it as a PNG at `output_path`
pub fn render_fitness_diagram(
    diagram: &FitnessDiagram,
    style: &Style,
    output_path: &Path,
) -> Result<()> {
    let canvas = plots::create_canvas(output_path, style)?;
    let margins = Margins::subplot(&canvas);

    // Axes are hidden: the chart only provides the coordinate mapping
    let chart = ChartBuilder::on(&canvas)
        .margin_left(margins.left)
        .margin_right(margins.right)
        .margin_top(margins.top)
        .margin_bottom(margins.bottom)
        .build_cartesian_2d(X_RANGE.0..X_RANGE.1, Y_RANGE.0..Y_RANGE.1)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    let arrow_style = ARROW_COLOR.stroke_width(style.px(ARROW_WIDTH) as u32);
    let head_length = style.points_to_pixels(ARROW_HEAD_LENGTH);
    for arrow in &diagram.arrows {
        plots::draw_arrow(
            &canvas,
            chart.backend_coord(&arrow.tail),
            chart.backend_coord(&arrow.tip),
            head_length,
            arrow_style,
        )?;
    }

    for key in &diagram.keys {
        let color = if key.highlighted { BLUE } else { BLACK };
        plots::draw_centered_text(
            &canvas,
            &key.letter.to_string(),
            chart.backend_coord(&key.position),
            style.font(GLYPH_SIZE),
            &color,
        )?;
    }

    plots::present(&canvas)?;
    info!("Wrote fitness diagram to {}", output_path.display());
    Ok(())
}

/// Renders the QWERTY diagram to `fitness.png`
pub fn generate_fitness_figure(
    paths: &FigurePaths,
    style: &Style,
) -> core::result::Result<FitnessDiagram, FigureError> {
    let diagram = FitnessDiagram::default();
    render_fitness_diagram(&diagram, style, &paths.figure(FITNESS_FIGURE))?;
    Ok(diagram)
}
