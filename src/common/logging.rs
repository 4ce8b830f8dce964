use env_logger::Env;
use log::LevelFilter;

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "LAYOUT_FIGURES_LOG";

/// Default filter: errors from dependencies, progress from this crate
const DEFAULT_FILTER: &str = "error,layout_figures=info";

/// Installs the global logger for a figure binary.
pub fn init_logging() {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(Env::default().filter_or(LOG_ENV, DEFAULT_FILTER))
        .format_timestamp(None)
        .init();
}
