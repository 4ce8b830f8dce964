//! Grid of the best layouts found by the optimiser
//!
//! Each `.err` result becomes one panel of a fixed 2x2 grid, titled with its
//! fitness. Letters are coloured by how frequent they are in English text so the
//! placement of the common letters stands out.

use crate::common::constants::{FigurePaths, LAYOUTS_FIGURE};
use crate::common::plots::{self, Margins, PlotError};
use crate::common::style::Style;
use crate::figures::FigureError;
use crate::parsing::{load_layout_result, select_results, LayoutResult, ResultKind};
use log::info;
use plotters::prelude::*;
use std::path::Path;

type Result<T> = core::result::Result<T, FigureError>;

/// Panel arrangement (rows, columns)
pub const GRID: (usize, usize) = (2, 2);

/// Maximum number of layouts one figure can show
pub const LAYOUT_CAPACITY: usize = GRID.0 * GRID.1;

/// The ten most frequent letters
pub const FREQUENT_LETTERS: &str = "etoahnsirl";

const GLYPH_SIZE: f64 = 32.0;

const X_RANGE: (f64, f64) = (0.0, 10.0);
const Y_RANGE: (f64, f64) = (-1.0, 3.0);

const ORANGE: RGBColor = RGBColor(0xFF, 0xA5, 0x00);

/// Colour group of a key in a layout panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterClass {
    /// One of [`FREQUENT_LETTERS`]
    Frequent,
    /// Anything outside `a..=z`
    NonAlphabetic,
    /// Remaining lowercase letters
    Other,
}

impl LetterClass {
    pub fn of(letter: char) -> Self {
        if FREQUENT_LETTERS.contains(letter) {
            LetterClass::Frequent
        } else if !letter.is_ascii_lowercase() {
            LetterClass::NonAlphabetic
        } else {
            LetterClass::Other
        }
    }

    pub fn color(&self) -> RGBColor {
        match self {
            LetterClass::Frequent => ORANGE,
            LetterClass::NonAlphabetic => BLUE,
            LetterClass::Other => BLACK,
        }
    }
}

/// Panel title for a result
pub fn panel_title(result: &LayoutResult) -> String {
    format!("Fitness: {}", format_score(result.score))
}

/// Shortest round-trip rendering of `score`. Values from 1e-4 up to 1e16 are
/// written positionally with at least one decimal, others as `1.5e+20`/`1e-05`.
pub fn format_score(score: f64) -> String {
    if score.is_nan() {
        return "nan".to_string();
    }
    if score.is_infinite() {
        return if score > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{score:e}");
    let Some((mantissa, exponent)) = scientific
        .split_once('e')
        .and_then(|(mantissa, exponent)| Some((mantissa, exponent.parse::<i32>().ok()?)))
    else {
        return scientific;
    };

    if score == 0.0 || (-4..16).contains(&exponent) {
        let positional = score.to_string();
        return if positional.contains('.') {
            positional
        } else {
            format!("{positional}.0")
        };
    }

    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.abs())
}

/// Draws up to [`LAYOUT_CAPACITY`] layouts and saves them as a PNG at `output_path`.
///
/// More results than panels is an error raised before anything is drawn.
pub fn render_layouts(results: &[LayoutResult], style: &Style, output_path: &Path) -> Result<()> {
    if results.len() > LAYOUT_CAPACITY {
        return Err(FigureError::TooManyLayouts {
            found: results.len(),
            capacity: LAYOUT_CAPACITY,
        });
    }

    let canvas = plots::create_canvas(output_path, style)?;
    let panels = canvas.split_evenly(GRID);
    let glyph_font = style.font(GLYPH_SIZE);

    for (result, panel) in results.iter().zip(panels.iter()) {
        let margins = Margins::subplot(panel);

        // Axes are hidden: the chart only provides the title and coordinate mapping
        let chart = ChartBuilder::on(panel)
            .caption(panel_title(result), style.axes_title_font())
            .margin_left(margins.left)
            .margin_right(margins.right)
            .margin_top(margins.top / 2)
            .margin_bottom(margins.bottom / 2)
            .build_cartesian_2d(X_RANGE.0..X_RANGE.1, Y_RANGE.0..Y_RANGE.1)
            .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

        for (y, row) in result.rows.iter().enumerate() {
            for (x, letter) in row.chars().enumerate() {
                plots::draw_centered_text(
                    &canvas,
                    &letter.to_string(),
                    chart.backend_coord(&(x as f64, y as f64)),
                    glyph_font.clone(),
                    &LetterClass::of(letter).color(),
                )?;
            }
        }
    }

    plots::present(&canvas)?;
    info!(
        "Wrote {} layout(s) to {}",
        results.len(),
        output_path.display()
    );
    Ok(())
}

/// Loads every `.err` result from the results directory and renders `layouts.png`
pub fn generate_layouts_figure(paths: &FigurePaths, style: &Style) -> Result<Vec<LayoutResult>> {
    let files = select_results(&paths.results_dir, ResultKind::Layouts)?;
    if files.len() > LAYOUT_CAPACITY {
        return Err(FigureError::TooManyLayouts {
            found: files.len(),
            capacity: LAYOUT_CAPACITY,
        });
    }

    let results = files
        .iter()
        .map(|file| load_layout_result(file))
        .collect::<core::result::Result<Vec<_>, _>>()?;

    render_layouts(&results, style, &paths.figure(LAYOUTS_FIGURE))?;
    Ok(results)
}
