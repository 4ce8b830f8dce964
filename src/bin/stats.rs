use layout_figures::common::logging::init_logging;
use layout_figures::common::summary::statistics_summary;
use layout_figures::figures::stats::generate_statistics_figure;
use layout_figures::{FigureError, FigurePaths, Style};

fn main() -> Result<(), FigureError> {
    init_logging();

    let series = generate_statistics_figure(&FigurePaths::default(), &Style::default())?;
    println!("{}", statistics_summary(&series));

    Ok(())
}
