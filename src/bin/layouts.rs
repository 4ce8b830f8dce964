use layout_figures::common::logging::init_logging;
use layout_figures::common::summary::layout_summary;
use layout_figures::figures::layouts::generate_layouts_figure;
use layout_figures::{FigureError, FigurePaths, Style};

fn main() -> Result<(), FigureError> {
    init_logging();

    let results = generate_layouts_figure(&FigurePaths::default(), &Style::default())?;
    println!("{}", layout_summary(&results));

    Ok(())
}
