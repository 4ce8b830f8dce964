//! Loading of the plain-text files produced by the layout optimiser
//!
//! Three formats are understood:
//! - the histogram table, one `<symbol> <count>` pair per line
//! - layout results (`.err`), a fitness score, a header line, then the letter grid
//! - statistics series, a two column table of minimum and average fitness per generation
//!
//! Malformed input is never repaired: the first offending line is reported as a
//! [`ParsingError`] naming the file and the 1-based line number.

use crate::common::constants::{LAYOUT_SUFFIX, SEQUENCE_SUFFIX};
use derive_new::new;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file parsing
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("Failed to read input file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list results directory {}: {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: expected `<symbol> <count>`, found {found} fields", .path.display())]
    FieldCount {
        path: PathBuf,
        line: usize,
        found: usize,
    },

    #[error("{}:{line}: count `{value}` is not an integer", .path.display())]
    InvalidCount {
        path: PathBuf,
        line: usize,
        value: String,
    },

    #[error("{}: missing fitness score on the first line", .path.display())]
    MissingScore { path: PathBuf },

    #[error("{}:1: fitness score `{value}` is not a number", .path.display())]
    InvalidScore { path: PathBuf, value: String },

    #[error("{}:{line}: expected 2 columns (minimum, average), found {found}", .path.display())]
    ColumnCount {
        path: PathBuf,
        line: usize,
        found: usize,
    },

    #[error("{}:{line}: `{value}` is not a number", .path.display())]
    InvalidNumber {
        path: PathBuf,
        line: usize,
        value: String,
    },

    #[error("{}: statistics table has no rows", .path.display())]
    EmptyTable { path: PathBuf },
}

type Result<T> = core::result::Result<T, ParsingError>;

/// Symbol counts in display order
#[derive(Debug, Clone, PartialEq, Eq, Default, new)]
pub struct Histogram {
    pub symbols: Vec<String>,
    pub counts: Vec<i64>,
}

impl Histogram {
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Sum of all counts, widened to `i128` so it cannot overflow
    pub fn total(&self) -> i128 {
        self.counts.iter().map(|&count| i128::from(count)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.symbols
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }
}

/// A keyboard layout found by the optimiser together with its fitness
#[derive(Debug, Clone, PartialEq, new)]
pub struct LayoutResult {
    /// File name the result was read from
    pub name: String,
    pub score: f64,
    /// Grid rows exactly as written, surrounding whitespace removed
    pub rows: Vec<String>,
}

/// Per-generation fitness of one optimiser run
#[derive(Debug, Clone, PartialEq, new)]
pub struct StatisticsSeries {
    /// File name the series was read from
    pub name: String,
    pub minimum: Vec<f64>,
    pub average: Vec<f64>,
}

impl StatisticsSeries {
    /// Number of generations recorded
    pub fn generations(&self) -> usize {
        self.minimum.len()
    }

    /// Generation index and value of the lowest finite minimum fitness
    pub fn best(&self) -> Option<(usize, f64)> {
        self.minimum
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, value)| value.is_finite())
            .fold(None, |best, (generation, value)| match best {
                Some((_, current)) if current <= value => best,
                _ => Some((generation, value)),
            })
    }
}

/// Which files of the results directory a figure consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// Files ending in `.err`
    Layouts,
    /// Files ending in neither `.err` nor `.seq`
    Statistics,
}

impl ResultKind {
    pub fn matches(&self, file_name: &str) -> bool {
        match self {
            ResultKind::Layouts => file_name.ends_with(LAYOUT_SUFFIX),
            ResultKind::Statistics => {
                !file_name.ends_with(LAYOUT_SUFFIX) && !file_name.ends_with(SEQUENCE_SUFFIX)
            }
        }
    }
}

/// Lists the regular files in `results_dir` that belong to `kind`, sorted by file name
/// so repeated runs draw series in the same order.
pub fn select_results(results_dir: &Path, kind: ResultKind) -> Result<Vec<PathBuf>> {
    let directory_error = |source: std::io::Error| ParsingError::DirectoryRead {
        path: results_dir.to_path_buf(),
        source,
    };

    let mut selected = Vec::new();
    for entry in fs::read_dir(results_dir).map_err(directory_error)? {
        let entry = entry.map_err(directory_error)?;
        if !entry.file_type().map_err(directory_error)?.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        if kind.matches(&file_name.to_string_lossy()) {
            selected.push(entry.path());
        }
    }

    selected.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(
        "Selected {} {:?} file(s) from {}",
        selected.len(),
        kind,
        results_dir.display()
    );
    Ok(selected)
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ParsingError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reads the histogram table at `path`
pub fn load_histogram(path: &Path) -> Result<Histogram> {
    parse_histogram(&read_to_string(path)?, path)
}

/// Parses `<symbol> <count>` lines; `source` is only used in error messages.
pub fn parse_histogram(contents: &str, source: &Path) -> Result<Histogram> {
    let mut histogram = Histogram::default();

    for (index, line) in contents.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [symbol, count] = fields.as_slice() else {
            return Err(ParsingError::FieldCount {
                path: source.to_path_buf(),
                line: index + 1,
                found: fields.len(),
            });
        };

        let count = count.parse::<i64>().map_err(|_| ParsingError::InvalidCount {
            path: source.to_path_buf(),
            line: index + 1,
            value: count.to_string(),
        })?;

        histogram.symbols.push(symbol.to_string());
        histogram.counts.push(count);
    }

    Ok(histogram)
}

/// Reads a single `.err` layout result
pub fn load_layout_result(path: &Path) -> Result<LayoutResult> {
    let result = parse_layout_result(&read_to_string(path)?, path)?;
    debug!(
        "{}: fitness {:?}, {} row(s)",
        result.name,
        result.score,
        result.rows.len()
    );
    Ok(result)
}

/// Parses a layout result: the score on line 1, a header on line 2, grid rows after.
pub fn parse_layout_result(contents: &str, source: &Path) -> Result<LayoutResult> {
    let mut lines = contents.lines();

    let score_text = lines
        .next()
        .map(str::trim)
        .ok_or_else(|| ParsingError::MissingScore {
            path: source.to_path_buf(),
        })?;
    let score = score_text
        .parse()
        .map_err(|_| ParsingError::InvalidScore {
            path: source.to_path_buf(),
            value: score_text.to_string(),
        })?;

    let mut rows: Vec<String> = lines.skip(1).map(|row| row.trim().to_string()).collect();
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }

    Ok(LayoutResult::new(file_name(source), score, rows))
}

/// Reads a statistics series
pub fn load_statistics(path: &Path) -> Result<StatisticsSeries> {
    let series = parse_statistics(&read_to_string(path)?, path)?;
    debug!("{}: {} generation(s)", series.name, series.generations());
    Ok(series)
}

/// Parses a whitespace separated two column table. Blank lines and `#` comments
/// are skipped.
pub fn parse_statistics(contents: &str, source: &Path) -> Result<StatisticsSeries> {
    let mut minimum = Vec::new();
    let mut average = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        let data = line.split_once('#').map_or(line, |(data, _)| data);
        let fields: Vec<&str> = data.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        if fields.len() != 2 {
            return Err(ParsingError::ColumnCount {
                path: source.to_path_buf(),
                line: index + 1,
                found: fields.len(),
            });
        }

        // `inf` and `nan` parse as floats but cannot be placed on an axis
        let parse = |field: &str| {
            field
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| ParsingError::InvalidNumber {
                    path: source.to_path_buf(),
                    line: index + 1,
                    value: field.to_string(),
                })
        };

        minimum.push(parse(fields[0])?);
        average.push(parse(fields[1])?);
    }

    if minimum.is_empty() {
        return Err(ParsingError::EmptyTable {
            path: source.to_path_buf(),
        });
    }

    Ok(StatisticsSeries::new(file_name(source), minimum, average))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn source() -> PathBuf {
        PathBuf::from("output/test")
    }

    #[test]
    fn parses_histogram_in_file_order() {
        let histogram = parse_histogram("a 5\nb 3\n", &source()).unwrap();
        assert_eq!(histogram.symbols, vec!["a", "b"]);
        assert_eq!(histogram.counts, vec![5, 3]);
        assert_eq!(histogram.total(), 8);
    }

    #[test]
    fn histogram_tolerates_surrounding_whitespace() {
        let histogram = parse_histogram("  e\t120  \r\n; 7\n", &source()).unwrap();
        assert_eq!(
            histogram.iter().collect::<Vec<_>>(),
            vec![("e", 120), (";", 7)]
        );
    }

    #[rstest]
    #[case::single_field("a\n", 1, 1)]
    #[case::three_fields("a 5\nb 3 1\n", 2, 3)]
    #[case::blank_line("a 5\n\nb 3\n", 2, 0)]
    fn histogram_rejects_wrong_field_count(
        #[case] contents: &str,
        #[case] expected_line: usize,
        #[case] expected_found: usize,
    ) {
        let error = parse_histogram(contents, &source()).unwrap_err();
        assert!(matches!(
            error,
            ParsingError::FieldCount { line, found, .. }
                if line == expected_line && found == expected_found
        ));
    }

    #[rstest]
    #[case("a five\n")]
    #[case("a 5.0\n")]
    fn histogram_rejects_non_integer_counts(#[case] contents: &str) {
        let error = parse_histogram(contents, &source()).unwrap_err();
        assert!(matches!(error, ParsingError::InvalidCount { line: 1, .. }));
        assert!(error.to_string().contains("output/test:1"));
    }

    #[test]
    fn parses_layout_result() {
        let contents = "12.34\n\nqwertyuiop\nasdfghjkl;\nzxcvbnm,./\n";
        let result = parse_layout_result(contents, Path::new("output/run.err")).unwrap();

        assert_eq!(result.name, "run.err");
        assert_eq!(result.score, 12.34);
        assert_eq!(result.rows, vec!["qwertyuiop", "asdfghjkl;", "zxcvbnm,./"]);
    }

    #[test]
    fn layout_rows_are_trimmed_and_trailing_blanks_dropped() {
        let contents = " 7.5 \nlayout:\n  abc  \ndef\n\n\n";
        let result = parse_layout_result(contents, &source()).unwrap();
        assert_eq!(result.score, 7.5);
        assert_eq!(result.rows, vec!["abc", "def"]);
    }

    #[test]
    fn layout_with_only_a_score_has_no_rows() {
        let result = parse_layout_result("3\n", &source()).unwrap();
        assert!(result.rows.is_empty());
    }

    #[rstest]
    #[case::empty("", true)]
    #[case::not_a_number("fitness\n\nabc\n", false)]
    fn layout_requires_numeric_score(#[case] contents: &str, #[case] missing: bool) {
        let error = parse_layout_result(contents, &source()).unwrap_err();
        if missing {
            assert!(matches!(error, ParsingError::MissingScore { .. }));
        } else {
            assert!(matches!(error, ParsingError::InvalidScore { ref value, .. } if value == "fitness"));
        }
    }

    #[test]
    fn parses_statistics_columns() {
        let series = parse_statistics("1.0 2.0\n0.5 1.5\n", Path::new("output/run1")).unwrap();
        assert_eq!(series.name, "run1");
        assert_eq!(series.minimum, vec![1.0, 0.5]);
        assert_eq!(series.average, vec![2.0, 1.5]);
        assert_eq!(series.generations(), 2);
    }

    #[test]
    fn statistics_skip_comments_and_blank_lines() {
        let contents = "# min avg\n\n3 4 # first\n  \n1e-1\t2.5\n";
        let series = parse_statistics(contents, &source()).unwrap();
        assert_eq!(series.minimum, vec![3.0, 0.1]);
        assert_eq!(series.average, vec![4.0, 2.5]);
    }

    #[rstest]
    #[case::one_column("1.0\n", 1, 1)]
    #[case::three_columns("1 2\n1 2 3\n", 2, 3)]
    fn statistics_require_two_columns(
        #[case] contents: &str,
        #[case] expected_line: usize,
        #[case] expected_found: usize,
    ) {
        let error = parse_statistics(contents, &source()).unwrap_err();
        assert!(matches!(
            error,
            ParsingError::ColumnCount { line, found, .. }
                if line == expected_line && found == expected_found
        ));
    }

    #[test]
    fn statistics_reject_non_numeric_fields() {
        let error = parse_statistics("1 2\n1 x\n", &source()).unwrap_err();
        assert!(matches!(error, ParsingError::InvalidNumber { line: 2, ref value, .. } if value == "x"));
    }

    #[rstest]
    #[case::infinity("1 2\ninf 3\n", 2, "inf")]
    #[case::negative_infinity("1 2\n3 -inf\n", 2, "-inf")]
    #[case::not_a_number("nan 2\n", 1, "nan")]
    #[case::spelled_out("1 infinity\n", 1, "infinity")]
    fn statistics_reject_non_finite_fields(
        #[case] contents: &str,
        #[case] expected_line: usize,
        #[case] expected_value: &str,
    ) {
        let error = parse_statistics(contents, &source()).unwrap_err();
        assert!(matches!(
            error,
            ParsingError::InvalidNumber { line, ref value, .. }
                if line == expected_line && value == expected_value
        ));
    }

    #[test]
    fn statistics_reject_empty_table() {
        let error = parse_statistics("# nothing\n", &source()).unwrap_err();
        assert!(matches!(error, ParsingError::EmptyTable { .. }));
    }

    #[test]
    fn best_generation_is_first_lowest_minimum() {
        let series = StatisticsSeries::new("s".into(), vec![5.0, 2.0, 3.0, 2.0], vec![0.0; 4]);
        assert_eq!(series.best(), Some((1, 2.0)));

        let empty = StatisticsSeries::new("e".into(), vec![], vec![]);
        assert_eq!(empty.best(), None);

        let gaps = StatisticsSeries::new("g".into(), vec![f64::NAN, 4.0, f64::NEG_INFINITY], vec![0.0; 3]);
        assert_eq!(gaps.best(), Some((1, 4.0)));
    }

    #[rstest]
    #[case("a.err", true, false)]
    #[case("b.seq", false, false)]
    #[case("c.stat", false, true)]
    #[case("run", false, true)]
    #[case("err", false, true)]
    fn result_kinds_select_by_suffix(
        #[case] file_name: &str,
        #[case] layout: bool,
        #[case] statistics: bool,
    ) {
        assert_eq!(ResultKind::Layouts.matches(file_name), layout);
        assert_eq!(ResultKind::Statistics.matches(file_name), statistics);
    }

    #[test]
    fn selects_regular_files_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.err", "c.stat", "a.err", "b.seq", "a.stat"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested.err")).unwrap();

        let layouts = select_results(dir.path(), ResultKind::Layouts).unwrap();
        assert_eq!(
            layouts,
            vec![dir.path().join("a.err"), dir.path().join("b.err")]
        );

        let statistics = select_results(dir.path(), ResultKind::Statistics).unwrap();
        assert_eq!(
            statistics,
            vec![dir.path().join("a.stat"), dir.path().join("c.stat")]
        );
    }

    #[test]
    fn missing_results_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = select_results(&dir.path().join("output"), ResultKind::Layouts).unwrap_err();
        assert!(matches!(error, ParsingError::DirectoryRead { .. }));
    }

    #[test]
    fn loads_files_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hist.csv");
        fs::write(&path, "a 5\nb 3\n").unwrap();
        assert_eq!(load_histogram(&path).unwrap().len(), 2);

        let error = load_histogram(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(error, ParsingError::FileRead { .. }));
    }
}
