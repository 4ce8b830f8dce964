use layout_figures::common::logging::init_logging;
use layout_figures::common::summary::histogram_summary;
use layout_figures::figures::hist::generate_histogram_figure;
use layout_figures::{FigureError, FigurePaths, Style};

fn main() -> Result<(), FigureError> {
    init_logging();

    let histogram = generate_histogram_figure(&FigurePaths::default(), &Style::default())?;
    println!("{}", histogram_summary(&histogram));

    Ok(())
}
