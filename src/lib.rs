//! # Layout Figures
//! Renders the figures for the keyboard layout search: the finger-travel diagram,
//! the letter frequency histogram, the grid of discovered layouts and the
//! fitness-over-generations curves.
//!
//! Each figure has a binary under `src/bin` that reads its inputs from the
//! conventional relative paths in [`common::constants`] and writes one PNG.

/// Shared infrastructure used by every figure.
pub mod common {
    /// Fixed input/output locations, suffixes and image geometry.
    pub mod constants;

    pub mod logging;

    /// Drawing helpers and the [`plots::PlotError`] type.
    pub mod plots;

    /// Chart appearance defaults applied to every figure.
    pub mod style;

    /// Console tables describing what was plotted.
    pub mod summary;
}

/// Loading of the result files written by the optimiser.
pub mod parsing;

/// One module per rendered figure.
pub mod figures {
    pub mod fitness;
    pub mod hist;
    pub mod layouts;
    pub mod stats;

    mod error;
    pub use error::FigureError;
}

pub use common::constants::FigurePaths;
pub use common::style::Style;
pub use figures::FigureError;
