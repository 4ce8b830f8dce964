//! Chart appearance shared by every figure
//!
//! A [`Style`] carries the defaults each figure is drawn with: serif fonts in three
//! size tiers, inward tick marks, the scientific-notation thresholds for axis labels,
//! the colour-blind friendly palette and the marker palette.
//!
//! Sizes are stored in points and converted to pixels with the output DPI, so a
//! 14pt label stays 14pt regardless of resolution.

use crate::common::constants::{DPI, FIGURE_SIZE_INCHES};
use plotters::prelude::*;
use plotters::style::FontDesc;

/// Default text, tick labels, legends and axes titles
pub const SMALL_SIZE: f64 = 14.0;

/// Axis labels
pub const MEDIUM_SIZE: f64 = 16.0;

/// Figure titles
pub const BIGGER_SIZE: f64 = 22.0;

/// Major tick length in points
const TICK_LENGTH: f64 = 3.5;

/// "tableau-colorblind10"
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(0x00, 0x6B, 0xA4),
    RGBColor(0xFF, 0x80, 0x0E),
    RGBColor(0xAB, 0xAB, 0xAB),
    RGBColor(0x59, 0x59, 0x59),
    RGBColor(0x5F, 0x9E, 0xD1),
    RGBColor(0xC8, 0x52, 0x00),
    RGBColor(0x89, 0x89, 0x89),
    RGBColor(0xA2, 0xC8, 0xEC),
    RGBColor(0xFF, 0xBC, 0x79),
    RGBColor(0xCF, 0xCF, 0xCF),
];

/// Marker symbols cycled through alongside [`PALETTE`]
pub const MARKERS: [Marker; 6] = [
    Marker::Star,
    Marker::TriDown,
    Marker::Plus,
    Marker::TriUp,
    Marker::Point,
    Marker::TriLeft,
];

/// Which side of the axis line tick marks are drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDirection {
    In,
    Out,
}

/// Marker shapes used to highlight individual data points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `*`
    Star,
    /// `1`
    TriDown,
    /// `+`
    Plus,
    /// `2`
    TriUp,
    /// `.`
    Point,
    /// `3`
    TriLeft,
}

impl Marker {
    /// Directions (in degrees, counter-clockwise from +x) of the spokes drawn for
    /// line-based markers. Filled markers have no spokes.
    pub fn spoke_angles(&self) -> &'static [f64] {
        match self {
            Marker::TriDown => &[270.0, 30.0, 150.0],
            Marker::TriUp => &[90.0, 210.0, 330.0],
            Marker::TriLeft => &[180.0, 300.0, 60.0],
            Marker::Plus => &[0.0, 90.0, 180.0, 270.0],
            Marker::Star | Marker::Point => &[],
        }
    }

    /// Vertices of the five-pointed star polygon around `center` in pixel space.
    pub fn star_vertices(center: (i32, i32), radius: f64) -> Vec<(i32, i32)> {
        let inner = radius * 0.4;
        (0..10)
            .map(|i| {
                let r = if i % 2 == 0 { radius } else { inner };
                let angle = (90.0 + 36.0 * i as f64).to_radians();
                (
                    center.0 + (r * angle.cos()).round() as i32,
                    center.1 - (r * angle.sin()).round() as i32,
                )
            })
            .collect()
    }
}

/// Appearance defaults for a figure
#[derive(Debug, Clone)]
pub struct Style {
    pub font_family: &'static str,
    /// Tick labels, legends, axes titles (points)
    pub small_size: f64,
    /// Axis labels (points)
    pub medium_size: f64,
    /// Figure titles (points)
    pub larger_size: f64,
    pub tick_direction: TickDirection,
    /// Axis labels use scientific notation when the order of magnitude of a value
    /// is at or below the first bound, or at or above the second.
    pub formatter_limits: (i32, i32),
    pub grid: bool,
    pub palette: &'static [RGBColor],
    pub markers: &'static [Marker],
    pub dpi: u32,
    /// Width and height in inches
    pub figure_size: (f64, f64),
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_family: "serif",
            small_size: SMALL_SIZE,
            medium_size: MEDIUM_SIZE,
            larger_size: BIGGER_SIZE,
            tick_direction: TickDirection::In,
            formatter_limits: (-3, 3),
            grid: true,
            palette: &PALETTE,
            markers: &MARKERS,
            dpi: DPI,
            figure_size: FIGURE_SIZE_INCHES,
        }
    }
}

impl Style {
    /// Converts a length in points to pixels at this style's DPI
    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    /// [`Style::points_to_pixels`], rounded for backend coordinates
    pub fn px(&self, points: f64) -> i32 {
        self.points_to_pixels(points).round() as i32
    }

    /// Output image size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.figure_size.0 * self.dpi as f64).round() as u32,
            (self.figure_size.1 * self.dpi as f64).round() as u32,
        )
    }

    /// Font of `points` size in this style's family
    pub fn font(&self, points: f64) -> FontDesc<'static> {
        (self.font_family, self.points_to_pixels(points)).into_font()
    }

    pub fn tick_font(&self) -> FontDesc<'static> {
        self.font(self.small_size)
    }

    pub fn axis_label_font(&self) -> FontDesc<'static> {
        self.font(self.medium_size)
    }

    pub fn axes_title_font(&self) -> FontDesc<'static> {
        self.font(self.small_size)
    }

    pub fn figure_title_font(&self) -> FontDesc<'static> {
        self.font(self.larger_size)
    }

    /// Signed tick length in pixels; negative lengths point into the plot.
    pub fn tick_mark_size(&self) -> i32 {
        let length = self.px(TICK_LENGTH);
        match self.tick_direction {
            TickDirection::In => -length,
            TickDirection::Out => length,
        }
    }

    /// Tick length handed to `plotters` meshes.
    ///
    /// A negative mesh tick size moves the axis line to the far edge of the label
    /// area, so meshes only ever draw outward ticks. Inward ticks are added by
    /// [`crate::common::plots::draw_inward_ticks`].
    pub fn mesh_tick_size(&self) -> i32 {
        self.tick_mark_size().max(0)
    }

    /// Gap between an axis and its tick labels, and between tick labels and the
    /// axis description
    pub fn label_gap(&self) -> u32 {
        self.px(self.small_size / 2.0).max(1) as u32
    }

    /// Palette colour for the `index`-th series, wrapping around
    pub fn color(&self, index: usize) -> RGBColor {
        self.palette[index % self.palette.len()]
    }

    /// Marker for the `index`-th series, wrapping around
    pub fn marker(&self, index: usize) -> Marker {
        self.markers[index % self.markers.len()]
    }

    /// Formats an axis value, switching to scientific notation outside
    /// [`Style::formatter_limits`].
    pub fn format_tick(&self, value: f64) -> String {
        if value == 0.0 || !value.is_finite() {
            return format!("{}", value.abs());
        }

        let magnitude = value.abs().log10().floor() as i32;
        let (low, high) = self.formatter_limits;
        if magnitude <= low || magnitude >= high {
            return format!("{:.1e}", value);
        }

        let text = format!("{:.3}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
