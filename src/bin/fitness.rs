use layout_figures::common::logging::init_logging;
use layout_figures::figures::fitness::generate_fitness_figure;
use layout_figures::{FigureError, FigurePaths, Style};

fn main() -> Result<(), FigureError> {
    init_logging();

    let diagram = generate_fitness_figure(&FigurePaths::default(), &Style::default())?;
    println!(
        "Drew {} keys and {} finger movements",
        diagram.keys.len(),
        diagram.arrows.len()
    );

    Ok(())
}
