//!
//! The benchmark harness executable.
//!

pub(crate) mod arguments;

use std::time::Instant;

use clap::Parser;
use colored::Colorize;

use self::arguments::Arguments;

///
/// The application entry point.
///
fn main() {
    let exit_code = match Arguments::try_parse()
        .map_err(|error| anyhow::anyhow!(error))
        .and_then(main_inner)
    {
        Ok(()) => bench_harness::EXIT_CODE_SUCCESS,
        Err(error) => {
            eprintln!("{error:?}");
            bench_harness::EXIT_CODE_FAILURE
        }
    };
    std::process::exit(exit_code);
}

///
/// The entry point wrapper used for proper error handling.
///
fn main_inner(arguments: Arguments) -> anyhow::Result<()> {
    let arguments = arguments::validation::validate_arguments(arguments)?;
    println!(
        "    {} {} v{}",
        "Starting".bright_green().bold(),
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    let suites = if arguments.suite.is_empty() {
        bench_harness::Suite::ALL.to_vec()
    } else {
        let mut suites = Vec::with_capacity(arguments.suite.len());
        for suite in arguments.suite.into_iter() {
            if !suites.contains(&suite) {
                suites.push(suite);
            }
        }
        suites
    };

    if arguments.workflow != bench_harness::Workflow::RunOnly {
        let builder = bench_harness::Builder::new(
            arguments.build_command,
            arguments.benchmark_dir.clone(),
        )?;
        builder.build()?;
    }
    if arguments.workflow == bench_harness::Workflow::Build {
        return Ok(());
    }

    let cores = match arguments.cores {
        Some(cores) => cores,
        None => std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1),
    };

    let harness = bench_harness::Harness {
        benchmark_dir: arguments.benchmark_dir,
        output_dir: arguments.output_dir,
        format: arguments.format,
        timeout: arguments.timeout.map(std::time::Duration::from_secs),
        cores,
        verbose: arguments.verbose,
    };

    let run_time_start = Instant::now();
    let mut summary = bench_harness::RunSummary::new(arguments.quiet);
    harness.run(suites.as_slice(), &mut summary)?;

    print!("{summary}");
    println!(
        "    {} running benchmarks in {}m{:02}s",
        "Finished".bright_green().bold(),
        run_time_start.elapsed().as_secs() / 60,
        run_time_start.elapsed().as_secs() % 60,
    );

    Ok(())
}
