//! Plotting infrastructure shared by the figure renderers
//!
//! This module provides the bitmap canvas every figure is drawn on, along with the
//! primitives `plotters` does not ship: centred glyphs, arrows with open heads and
//! the marker shapes from the [`Style`] marker palette. All helpers work in pixel
//! space on the root drawing area.

use crate::common::style::{Marker, Style};
use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontDesc;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Root drawing area of a PNG figure, addressed in pixels
pub type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Chart of `f64` data drawn on a [`Canvas`]
pub type Chart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Number of labelled ticks requested per axis
pub const TICK_COUNT: usize = 10;

/// Opens a white canvas sized from `style` that is written to `output_path` on
/// [`present`]. The parent directory is created if it does not exist yet.
pub fn create_canvas<'a>(output_path: &'a Path, style: &Style) -> Result<Canvas<'a>> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let root = BitMapBackend::new(output_path, style.pixel_size()).into_drawing_area();

    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    Ok(root)
}

/// Flushes the canvas to its PNG file
pub fn present(canvas: &Canvas<'_>) -> Result<()> {
    canvas
        .present()
        .map_err(|e| PlotError::Drawing(e.to_string()))
}

/// Draws `text` centred on `center`
pub fn draw_centered_text(
    canvas: &Canvas<'_>,
    text: &str,
    center: (i32, i32),
    font: FontDesc<'_>,
    color: &RGBColor,
) -> Result<()> {
    let style = font
        .color(color)
        .pos(Pos::new(HPos::Center, VPos::Center));

    canvas
        .draw(&Text::new(text, center, style))
        .map_err(|e| PlotError::Drawing(e.to_string()))
}

/// End points of the two barbs of an open arrow head at `tip`, for a shaft coming
/// from `tail`. Barbs sit 30 degrees either side of the shaft.
pub fn arrow_head(tail: (f64, f64), tip: (f64, f64), length: f64) -> [(f64, f64); 2] {
    let angle = (tip.1 - tail.1).atan2(tip.0 - tail.0);
    let spread = 30f64.to_radians();

    [angle + spread, angle - spread].map(|barb| {
        (
            tip.0 - length * barb.cos(),
            tip.1 - length * barb.sin(),
        )
    })
}

/// Draws a `->` style arrow from `tail` to `tip`
pub fn draw_arrow(
    canvas: &Canvas<'_>,
    tail: (i32, i32),
    tip: (i32, i32),
    head_length: f64,
    style: ShapeStyle,
) -> Result<()> {
    let tail_f = (tail.0 as f64, tail.1 as f64);
    let tip_f = (tip.0 as f64, tip.1 as f64);

    canvas
        .draw(&PathElement::new(vec![tail, tip], style))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    for barb in arrow_head(tail_f, tip_f, head_length) {
        let barb = (barb.0.round() as i32, barb.1.round() as i32);
        canvas
            .draw(&PathElement::new(vec![barb, tip], style))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    Ok(())
}

/// Draws `marker` centred on `center` with the given outer radius in pixels
pub fn draw_marker(
    canvas: &Canvas<'_>,
    marker: Marker,
    center: (i32, i32),
    radius: f64,
    color: &RGBColor,
) -> Result<()> {
    match marker {
        Marker::Star => canvas
            .draw(&Polygon::new(
                Marker::star_vertices(center, radius),
                color.filled(),
            ))
            .map_err(|e| PlotError::Drawing(e.to_string())),
        Marker::Point => canvas
            .draw(&Circle::new(
                center,
                (radius / 3.0).round() as i32,
                color.filled(),
            ))
            .map_err(|e| PlotError::Drawing(e.to_string())),
        _ => {
            let stroke = color.stroke_width((radius / 4.0).max(1.0).round() as u32);
            for angle in marker.spoke_angles() {
                let angle = angle.to_radians();
                let end = (
                    center.0 + (radius * angle.cos()).round() as i32,
                    center.1 - (radius * angle.sin()).round() as i32,
                );
                canvas
                    .draw(&PathElement::new(vec![center, end], stroke))
                    .map_err(|e| PlotError::Drawing(e.to_string()))?;
            }
            Ok(())
        }
    }
}

/// Values a mesh asked for at most `count` labels places them at on `range`
pub fn tick_values(range: (f64, f64), count: usize) -> Vec<f64> {
    RangedCoordf64::from(range.0..range.1).key_points(count)
}

/// End points of a tick of signed `length` starting on an axis at `base`.
/// Negative lengths point into the plot, which lies above the x axis and right of
/// the y axis.
pub fn tick_segment(base: (i32, i32), on_x_axis: bool, length: i32) -> [(i32, i32); 2] {
    if on_x_axis {
        [base, (base.0, base.1 + length)]
    } else {
        [base, (base.0 - length, base.1)]
    }
}

/// Draws inward tick marks from the bottom and left edges of `chart`, whose lower
/// left data corner is `origin`. Does nothing when `style` ticks point outward,
/// since meshes draw those.
pub fn draw_inward_ticks(
    canvas: &Canvas<'_>,
    chart: &Chart<'_, '_>,
    origin: (f64, f64),
    x_ticks: &[f64],
    y_ticks: &[f64],
    style: &Style,
) -> Result<()> {
    let length = style.tick_mark_size();
    if length >= 0 {
        return Ok(());
    }

    let x_segments = x_ticks
        .iter()
        .map(|&x| tick_segment(chart.backend_coord(&(x, origin.1)), true, length));
    let y_segments = y_ticks
        .iter()
        .map(|&y| tick_segment(chart.backend_coord(&(origin.0, y)), false, length));

    for [start, end] in x_segments.chain(y_segments) {
        canvas
            .draw(&PathElement::new(vec![start, end], BLACK.stroke_width(1)))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    Ok(())
}

/// Outlines the plotting area of `chart` spanning `x_range` by `y_range`
pub fn draw_frame(chart: &Chart<'_, '_>, x_range: (f64, f64), y_range: (f64, f64)) -> Result<()> {
    chart
        .plotting_area()
        .draw(&Rectangle::new(
            [(x_range.0, y_range.0), (x_range.1, y_range.1)],
            BLACK.stroke_width(1),
        ))
        .map_err(|e| PlotError::Drawing(e.to_string()))
}

/// Height of the area below a chart: one row of tick labels and, when `described`,
/// the axis description under it
pub fn x_label_area_size(style: &Style, described: bool) -> u32 {
    let gap = style.label_gap();
    let labels = style.px(style.small_size) as u32 + 2 * gap;
    if described {
        labels + style.px(style.medium_size) as u32 + gap
    } else {
        labels
    }
}

/// Width of the area left of a chart: the widest of `labels` and, when `described`,
/// the rotated axis description beside them
pub fn y_label_area_size(style: &Style, labels: &[String], described: bool) -> Result<u32> {
    let font = style.tick_font();
    let mut widest = 0;
    for label in labels {
        let (width, _) = font
            .box_size(label)
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
        widest = widest.max(width);
    }

    let gap = style.label_gap();
    let size = widest + 2 * gap;
    if described {
        Ok(size + style.px(style.medium_size) as u32 + gap)
    } else {
        Ok(size)
    }
}

/// Pixel margins that leave the same border around a chart as a default subplot:
/// 12.5% left, 10% right, 12% top, 11% bottom of the area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Margins {
    pub fn subplot(area: &Canvas<'_>) -> Self {
        let (width, height) = area.dim_in_pixel();
        Self::for_size(width, height)
    }

    pub fn for_size(width: u32, height: u32) -> Self {
        let scale = |length: u32, fraction: f64| (length as f64 * fraction).round() as u32;
        Self {
            left: scale(width, 0.125),
            right: scale(width, 0.1),
            top: scale(height, 0.12),
            bottom: scale(height, 0.11),
        }
    }
}

/// Extends `min..max` by `fraction` of its span on each side, giving degenerate
/// ranges a unit span so the chart still has a scale.
pub fn padded_range(min: f64, max: f64, fraction: f64) -> (f64, f64) {
    if min >= max {
        return (min - 0.5, max + 0.5);
    }

    let pad = (max - min) * fraction;
    (min - pad, max + pad)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn arrow_head_points_back_along_shaft() {
        // Shaft pointing right: barbs end left of the tip, mirrored around the shaft
        let [upper, lower] = arrow_head((0.0, 0.0), (10.0, 0.0), 2.0);
        let dx = 2.0 * 30f64.to_radians().cos();
        let dy = 2.0 * 30f64.to_radians().sin();
        assert!(close(upper, (10.0 - dx, -dy)));
        assert!(close(lower, (10.0 - dx, dy)));
    }

    #[test]
    fn arrow_head_barbs_have_requested_length() {
        let tip = (3.0, 7.0);
        for barb in arrow_head((-4.0, 1.0), tip, 5.0) {
            let length = ((barb.0 - tip.0).powi(2) + (barb.1 - tip.1).powi(2)).sqrt();
            assert!((length - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn padded_range_grows_both_sides() {
        assert_eq!(padded_range(0.0, 8.0, 0.25), (-2.0, 10.0));
        assert_eq!(padded_range(3.0, 3.0, 0.05), (2.5, 3.5));
    }

    #[test]
    fn inward_ticks_point_into_the_plot() {
        assert_eq!(tick_segment((10, 100), true, -7), [(10, 100), (10, 93)]);
        assert_eq!(tick_segment((10, 100), false, -7), [(10, 100), (17, 100)]);
        assert_eq!(tick_segment((10, 100), true, 7), [(10, 100), (10, 107)]);
    }

    #[test]
    fn tick_values_stay_inside_range() {
        let ticks = tick_values((-0.5, 12.5), TICK_COUNT);
        assert!(!ticks.is_empty());
        assert!(ticks.len() <= TICK_COUNT);
        assert!(ticks.iter().all(|t| (-0.5..=12.5).contains(t)));
    }

    #[test]
    fn label_areas_leave_room_for_descriptions() {
        let style = Style::default();
        let plain = x_label_area_size(&style, false);
        let described = x_label_area_size(&style, true);
        assert!(plain > style.px(style.small_size) as u32);
        assert!(described >= plain + style.px(style.medium_size) as u32);
    }

    #[test]
    fn y_label_area_fits_widest_label() {
        let style = Style::default();
        let labels = vec!["1".to_string(), "1.0e-4".to_string()];
        let (widest, _) = style.tick_font().box_size("1.0e-4").unwrap();

        let plain = y_label_area_size(&style, &labels, false).unwrap();
        let described = y_label_area_size(&style, &labels, true).unwrap();
        assert!(plain > widest);
        assert!(described > plain + style.px(style.medium_size) as u32);
    }

    #[test]
    fn subplot_margins_scale_with_area() {
        let margins = Margins::for_size(2400, 1600);
        assert_eq!(
            margins,
            Margins {
                left: 300,
                right: 240,
                top: 192,
                bottom: 176,
            }
        );
    }

    #[test]
    fn canvas_writes_png_on_present() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("figures").join("blank.png");
        let style = Style {
            dpi: 10,
            ..Style::default()
        };

        let canvas = create_canvas(&output_path, &style).unwrap();
        draw_marker(&canvas, Marker::Star, (60, 40), 10.0, &BLACK).unwrap();
        draw_marker(&canvas, Marker::TriUp, (30, 40), 10.0, &BLACK).unwrap();
        draw_arrow(&canvas, (10, 10), (50, 50), 5.0, BLACK.stroke_width(2)).unwrap();
        present(&canvas).unwrap();
        drop(canvas);

        assert!(fs::metadata(&output_path).unwrap().len() > 0);
    }

    /// True when every pixel within `thickness` of the edge of an RGB buffer is white
    pub(crate) fn border_is_blank(buffer: &[u8], size: (u32, u32), thickness: u32) -> bool {
        let (width, height) = size;
        (0..height).all(|y| {
            (0..width).all(|x| {
                let inside = x >= thickness
                    && y >= thickness
                    && x < width - thickness
                    && y < height - thickness;
                let offset = ((y * width + x) * 3) as usize;
                inside || buffer[offset..offset + 3] == [255, 255, 255]
            })
        })
    }

    #[test]
    fn blank_border_detects_edge_pixels() {
        let mut buffer = vec![255u8; 4 * 4 * 3];
        assert!(border_is_blank(&buffer, (4, 4), 1));

        buffer[0] = 0;
        assert!(!border_is_blank(&buffer, (4, 4), 1));
    }
}
