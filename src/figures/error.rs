use crate::common::plots::PlotError;
use crate::parsing::ParsingError;
use thiserror::Error;

/// Errors that can occur while producing a figure
#[derive(Error, Debug)]
pub enum FigureError {
    #[error("Parsing error: {0}")]
    Parsing(#[from] ParsingError),

    #[error("Plot error: {0}")]
    Plot(#[from] PlotError),

    #[error("Found {found} layout results but the figure only has room for {capacity}")]
    TooManyLayouts { found: usize, capacity: usize },
}
