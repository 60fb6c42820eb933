//!
//! The benchmark harness arguments.
//!

pub mod validation;

use std::path::PathBuf;

use clap::Parser;

use report_analyzer::OutputFormat;

use bench_harness::Suite;
use bench_harness::Workflow;

///
/// The benchmark harness arguments.
///
#[derive(Debug, Parser)]
#[command(about, long_about = None)]
pub struct Arguments {
    /// Runs only the specified suites, in the given order.
    /// Available suites: `mandelbrot`, `saxpy`, `sqrt`.
    /// All suites run when none is specified.
    #[arg(short, long)]
    pub suite: Vec<Suite>,

    /// The directory holding the native executables; their side-effect files
    /// are read from here as well.
    #[arg(long, default_value = ".")]
    pub benchmark_dir: PathBuf,

    /// The directory receiving the report artifacts.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// The build command run before the suites.
    #[arg(long, default_value = "make")]
    pub build_command: String,

    /// Choose between `build` to only build the native executables,
    /// `run` to skip the build step, and `build-and-run` for both.
    #[arg(long, default_value_t = Workflow::BuildAndRun)]
    pub workflow: Workflow,

    /// The tabular output format: `csv` or `json`.
    #[arg(long, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// The per-invocation bound in seconds. A hung invocation is killed on
    /// expiry, its point is marked failed, and the matrix proceeds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// The ideal parallelism degree for efficiency figures.
    /// Detected from the hardware when not specified.
    #[arg(long)]
    pub cores: Option<usize>,

    /// Echoes the executables' standard output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppresses the end-of-run summary.
    #[arg(short, long)]
    pub quiet: bool,
}
