//!
//! The benchmark harness library.
//!

pub(crate) mod builder;
pub(crate) mod extract;
pub(crate) mod matrix;
pub(crate) mod runner;
pub(crate) mod suite;
pub(crate) mod summary;
pub(crate) mod workflow;

pub use self::builder::Builder;
pub use self::extract::error::ExtractionError;
pub use self::extract::line_pattern::LineField;
pub use self::extract::line_pattern::LineSchema;
pub use self::extract::table_file::TableSchema;
pub use self::matrix::enumerate;
pub use self::matrix::run_matrix;
pub use self::matrix::Axis;
pub use self::runner::RunOutcome;
pub use self::runner::Runner;
pub use self::runner::RunnerError;
pub use self::suite::Suite;
pub use self::summary::RunSummary;
pub use self::workflow::Workflow;

use std::path::PathBuf;
use std::time::Duration;

use report_analyzer::OutputFormat;

/// The process exit code for a successful run.
pub const EXIT_CODE_SUCCESS: i32 = 0;

/// The process exit code for a failed run.
pub const EXIT_CODE_FAILURE: i32 = 1;

///
/// The benchmark harness: the run-wide configuration shared by the suites.
///
pub struct Harness {
    /// The directory holding the native executables and their side-effect
    /// files.
    pub benchmark_dir: PathBuf,
    /// The directory receiving report artifacts.
    pub output_dir: PathBuf,
    /// The tabular output format.
    pub format: OutputFormat,
    /// The per-invocation bound, if any.
    pub timeout: Option<Duration>,
    /// The ideal parallelism degree for efficiency figures.
    pub cores: usize,
    /// Whether to echo the executables' standard output.
    pub verbose: bool,
}

impl Harness {
    ///
    /// A runner for one of the native executables.
    ///
    pub fn runner(&self, executable_name: &str) -> Runner {
        Runner::new(
            self.benchmark_dir.join(executable_name),
            self.benchmark_dir.clone(),
            self.timeout,
        )
    }

    ///
    /// The path of a side-effect file the executable writes next to itself.
    ///
    pub fn side_effect_path(&self, file_name: &str) -> PathBuf {
        self.benchmark_dir.join(file_name)
    }

    ///
    /// The path of the tabular results artifact for a suite, with the
    /// extension following the configured format.
    ///
    pub fn table_path(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{stem}.{}", self.format))
    }

    ///
    /// The path of a non-tabular report artifact.
    ///
    pub fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    ///
    /// Runs the selected suites in order, one at a time.
    ///
    pub fn run(&self, suites: &[Suite], summary: &mut RunSummary) -> anyhow::Result<()> {
        std::fs::create_dir_all(self.output_dir.as_path())?;
        for suite in suites.iter() {
            suite.run(self, summary)?;
        }
        Ok(())
    }
}
