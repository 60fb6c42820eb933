//!
//! The benchmark suites: the pipeline variants driving each native
//! executable.
//!

pub mod mandelbrot;
pub mod saxpy;
pub mod sqrt;

use std::str::FromStr;

use colored::Colorize;

use report_analyzer::Figure;
use report_analyzer::Output;
use report_analyzer::ResultsTable;

use crate::summary::RunSummary;
use crate::Harness;

///
/// A benchmark suite.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suite {
    /// The fractal renderer, parameterized by resolution and iteration
    /// count, reporting times on labeled stdout lines.
    Mandelbrot,
    /// The SAXPY kernel, self-parameterized, reporting through structured
    /// side-effect files.
    Saxpy,
    /// The square-root kernel over data distributions, self-parameterized,
    /// reporting through a structured side-effect file.
    Sqrt,
}

impl Suite {
    /// All suites, in default execution order.
    pub const ALL: [Self; 3] = [Self::Mandelbrot, Self::Saxpy, Self::Sqrt];

    ///
    /// The name of the native executable the suite drives.
    ///
    pub fn executable_name(self) -> &'static str {
        match self {
            Self::Mandelbrot => "mandelbrot",
            Self::Saxpy => "saxpy_experiment",
            Self::Sqrt => "sqrt_benchmark",
        }
    }

    ///
    /// Runs the suite: matrix, extraction, derivation, reporting.
    ///
    pub fn run(self, harness: &Harness, summary: &mut RunSummary) -> anyhow::Result<()> {
        match self {
            Self::Mandelbrot => mandelbrot::run(harness, summary),
            Self::Saxpy => saxpy::run(harness, summary),
            Self::Sqrt => sqrt::run(harness, summary),
        }
    }
}

impl FromStr for Suite {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string.to_lowercase().as_str() {
            "mandelbrot" => Ok(Self::Mandelbrot),
            "saxpy" => Ok(Self::Saxpy),
            "sqrt" => Ok(Self::Sqrt),
            string => anyhow::bail!(
                "Unknown suite `{string}`. Supported suites: {}",
                Self::ALL
                    .into_iter()
                    .map(|suite| suite.to_string())
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
        }
    }
}

impl std::fmt::Display for Suite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mandelbrot => write!(f, "mandelbrot"),
            Self::Saxpy => write!(f, "saxpy"),
            Self::Sqrt => write!(f, "sqrt"),
        }
    }
}

///
/// Persists a results table as the suite's durable tabular artifact.
///
/// An empty table still writes a header-only artifact. A write failure is
/// fatal to this reporter step only: it is surfaced and the run goes on with
/// the collected results intact in memory.
///
pub(crate) fn persist_table(
    harness: &Harness,
    summary: &mut RunSummary,
    table: &ResultsTable,
    stem: &str,
) {
    let path = harness.table_path(stem);
    let output = Output::from((table, &harness.format));
    match output.write_to_file(path.as_path()) {
        Ok(()) => summary.artifact(path.as_path()),
        Err(error) => summary.reporter_failure("persisting the results table", &error),
    }
}

///
/// Renders a figure to an SVG artifact.
///
/// A figure with nothing drawable is skipped with a notice; a write failure
/// is reported and does not abort persistence of the tabular file.
///
pub(crate) fn render_figure(
    harness: &Harness,
    summary: &mut RunSummary,
    figure: &Figure,
    file_name: &str,
) {
    match figure.render() {
        Some(svg) => {
            let path = harness.artifact_path(file_name);
            match std::fs::write(path.as_path(), svg) {
                Ok(()) => summary.artifact(path.as_path()),
                Err(error) => {
                    summary.reporter_failure("rendering the chart", &anyhow::anyhow!(error))
                }
            }
        }
        None => {
            println!(
                "     {} chart {file_name}: no data",
                "Skipped".bright_black().bold(),
            );
        }
    }
}

///
/// Writes a narrative report artifact.
///
pub(crate) fn write_narrative(
    harness: &Harness,
    summary: &mut RunSummary,
    text: &str,
    file_name: &str,
) {
    let path = harness.artifact_path(file_name);
    match std::fs::write(path.as_path(), text) {
        Ok(()) => summary.artifact(path.as_path()),
        Err(error) => summary.reporter_failure("writing the narrative report", &anyhow::anyhow!(error)),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Suite;

    #[test]
    fn parses_known_suites() {
        assert_eq!(
            Suite::from_str("mandelbrot").expect("Known suite"),
            Suite::Mandelbrot
        );
        assert_eq!(Suite::from_str("SAXPY").expect("Known suite"), Suite::Saxpy);
    }

    #[test]
    fn rejects_unknown_suites() {
        assert!(Suite::from_str("fibonacci").is_err());
    }
}
