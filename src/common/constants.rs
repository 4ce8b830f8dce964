//! Location and geometry constants for figure generation
//!
//! All paths are relative to the working directory the binaries are started from,
//! matching the layout the optimiser writes its results into.

use derive_new::new;
use std::path::{Path, PathBuf};

/// Directory holding the optimiser's result files
pub const RESULTS_DIR: &str = "output";

/// Directory every figure is written into
pub const FIGURES_DIR: &str = "figures";

/// Symbol/count table consumed by the histogram
pub const HISTOGRAM_FILE: &str = "hist.csv";

/// Suffix of layout result files (score + letter grid)
pub const LAYOUT_SUFFIX: &str = ".err";

/// Suffix of sequence files; neither a layout nor a statistics series
pub const SEQUENCE_SUFFIX: &str = ".seq";

/// Output resolution in dots per inch
pub const DPI: u32 = 200;

/// Figure size in inches (width, height)
pub const FIGURE_SIZE_INCHES: (f64, f64) = (12.0, 8.0);

pub const FITNESS_FIGURE: &str = "fitness.png";
pub const HISTOGRAM_FIGURE: &str = "hist.png";
pub const LAYOUTS_FIGURE: &str = "layouts.png";
pub const STATS_FIGURE: &str = "stats.png";

/// Input and output locations used by the figure binaries
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct FigurePaths {
    /// Directory scanned for `.err` layouts and statistics series
    pub results_dir: PathBuf,
    /// Directory the PNG files are written to
    pub figures_dir: PathBuf,
    /// Histogram input table
    pub histogram_file: PathBuf,
}

impl FigurePaths {
    /// Full path of a figure called `name` inside [`FigurePaths::figures_dir`]
    pub fn figure(&self, name: &str) -> PathBuf {
        self.figures_dir.join(name)
    }

    /// Paths rooted at `root` instead of the working directory
    pub fn rooted_at(root: &Path) -> Self {
        Self::new(
            root.join(RESULTS_DIR),
            root.join(FIGURES_DIR),
            root.join(HISTOGRAM_FILE),
        )
    }
}

impl Default for FigurePaths {
    fn default() -> Self {
        Self::new(
            PathBuf::from(RESULTS_DIR),
            PathBuf::from(FIGURES_DIR),
            PathBuf::from(HISTOGRAM_FILE),
        )
    }
}
