//! Console summaries of the data behind each figure
//!
//! The binaries print one of these tables after writing their image so a run can
//! be checked without opening the PNG. Tables are formatted with the [`tabled`] crate.

use crate::parsing::{Histogram, LayoutResult, StatisticsSeries};
use tabled::{Table, Tabled};

/// One histogram symbol with its share of all counts
#[derive(Debug, Clone, Tabled)]
pub struct SymbolEntry {
    #[tabled(rename = "Symbol")]
    pub symbol: String,
    #[tabled(rename = "Count")]
    pub count: i64,
    /// Percentage of the total count
    #[tabled(rename = "Share")]
    pub share: String,
}

impl SymbolEntry {
    /// Creates a new entry with formatted share
    pub fn new(symbol: String, count: i64, total: i128) -> Self {
        Self {
            symbol,
            count,
            share: percentage(count, total),
        }
    }
}

/// One layout panel
#[derive(Debug, Clone, Tabled)]
pub struct LayoutEntry {
    #[tabled(rename = "File")]
    pub file: String,
    #[tabled(rename = "Fitness")]
    pub fitness: f64,
    #[tabled(rename = "Rows")]
    pub rows: usize,
}

/// One optimiser run
#[derive(Debug, Clone, Tabled)]
pub struct SeriesEntry {
    #[tabled(rename = "File")]
    pub file: String,
    #[tabled(rename = "Generations")]
    pub generations: usize,
    #[tabled(rename = "Best Min")]
    pub best_minimum: String,
    #[tabled(rename = "Best Generation")]
    pub best_generation: String,
    #[tabled(rename = "Final Avg")]
    pub final_average: String,
}

impl From<&StatisticsSeries> for SeriesEntry {
    fn from(series: &StatisticsSeries) -> Self {
        let best = series.best();
        Self {
            file: series.name.clone(),
            generations: series.generations(),
            best_minimum: best.map_or("-".to_string(), |(_, value)| value.to_string()),
            best_generation: best.map_or("-".to_string(), |(generation, _)| {
                generation.to_string()
            }),
            final_average: series
                .average
                .last()
                .map_or("-".to_string(), f64::to_string),
        }
    }
}

fn percentage(count: i64, total: i128) -> String {
    if total == 0 {
        "0.00%".to_string()
    } else {
        format!("{:.2}%", (count as f64 / total as f64) * 100.0)
    }
}

/// Formats rows as an ASCII table with an optional underlined title
pub fn format_table<T: Tabled>(rows: &[T], title: Option<&str>) -> String {
    if rows.is_empty() {
        return "No data available".to_string();
    }

    let table = Table::new(rows).to_string();

    if let Some(title) = title {
        format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
    } else {
        table
    }
}

pub fn histogram_summary(histogram: &Histogram) -> String {
    let total = histogram.total();
    let entries: Vec<SymbolEntry> = histogram
        .iter()
        .map(|(symbol, count)| SymbolEntry::new(symbol.to_string(), count, total))
        .collect();

    format_table(&entries, Some("Symbol Frequencies"))
}

pub fn layout_summary(results: &[LayoutResult]) -> String {
    let entries: Vec<LayoutEntry> = results
        .iter()
        .map(|result| LayoutEntry {
            file: result.name.clone(),
            fitness: result.score,
            rows: result.rows.len(),
        })
        .collect();

    format_table(&entries, Some("Layouts"))
}

pub fn statistics_summary(series: &[StatisticsSeries]) -> String {
    let entries: Vec<SeriesEntry> = series.iter().map(SeriesEntry::from).collect();
    format_table(&entries, Some("Fitness per Run"))
}
