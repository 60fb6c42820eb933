//!
//! The benchmark harness run summary.
//!

use std::path::Path;
use std::path::PathBuf;

use colored::Colorize;

use report_analyzer::ConfigPoint;

///
/// The run summary: per-point progress printing plus the counters and
/// artifact locations reported at the end of the run.
///
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Whether the end-of-run output is suppressed.
    quiet: bool,
    /// The measured points counter.
    measured: usize,
    /// The skipped points with their failure descriptions.
    skipped: Vec<(String, String)>,
    /// The artifacts written so far.
    artifacts: Vec<PathBuf>,
}

impl RunSummary {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            ..Self::default()
        }
    }

    ///
    /// Records a measured point, printing its identity.
    ///
    pub fn measured(&mut self, point: &ConfigPoint) {
        println!("    {} {point}", "Measured".bright_green().bold());
        self.measured += 1;
    }

    ///
    /// Records a skipped point with its failure kind, printing a diagnostic.
    /// The point is permanently excluded from this run: no retries.
    ///
    pub fn skipped(&mut self, point: &ConfigPoint, reason: String) {
        println!(
            "     {} {point}: {reason}",
            "Skipped".bright_red().bold(),
        );
        self.skipped.push((point.to_string(), reason));
    }

    ///
    /// Records a written artifact, printing its location.
    ///
    pub fn artifact(&mut self, path: &Path) {
        println!("       {} {path:?}", "Wrote".bright_green().bold());
        self.artifacts.push(path.to_owned());
    }

    ///
    /// Reports a non-fatal reporter-stage failure.
    ///
    pub fn reporter_failure(&mut self, what: &str, error: &anyhow::Error) {
        println!("      {} {what}: {error}", "Failed".bright_red().bold());
    }

    ///
    /// Whether any point produced a result.
    ///
    pub fn has_results(&self) -> bool {
        self.measured > 0
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.quiet {
            return Ok(());
        }

        writeln!(
            f,
            "╔═══════════════════╡ BENCHMARK HARNESS ╞═════════════════════╗"
        )?;
        writeln!(
            f,
            "║                                                              ║"
        )?;
        writeln!(
            f,
            "║     {:8}                                  {:10}     ║",
            "MEASURED".green(),
            self.measured.to_string().green(),
        )?;
        writeln!(
            f,
            "║     {:8}                                  {:10}     ║",
            "SKIPPED".bright_red(),
            self.skipped.len().to_string().bright_red(),
        )?;
        writeln!(
            f,
            "╚══════════════════════════════════════════════════════════════╝"
        )?;

        if !self.has_results() {
            writeln!(f, "No results obtained.")?;
        }
        for path in self.artifacts.iter() {
            writeln!(f, "Artifact: {path:?}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use report_analyzer::ConfigPoint;

    use super::RunSummary;

    #[test]
    fn counts_measured_and_skipped_points() {
        let mut summary = RunSummary::new(true);
        summary.measured(&ConfigPoint::labeled("distribution", "UNIFORM"));
        summary.skipped(
            &ConfigPoint::labeled("distribution", "NORMAL"),
            "required field `serial_time` was not found in the output".to_owned(),
        );
        assert!(summary.has_results());
        assert_eq!(summary.skipped.len(), 1);
    }

    #[test]
    fn empty_run_reports_no_results() {
        let summary = RunSummary::new(false);
        assert!(!summary.has_results());
        assert!(summary.to_string().contains("No results obtained."));
    }

    #[test]
    fn quiet_summary_renders_nothing() {
        let summary = RunSummary::new(true);
        assert!(summary.to_string().is_empty());
    }
}
