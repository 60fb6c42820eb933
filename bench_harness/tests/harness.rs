//!
//! End-to-end tests driving the suites against stub executables.
//!

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::path::PathBuf;

use bench_harness::Harness;
use bench_harness::RunSummary;
use bench_harness::Suite;
use report_analyzer::OutputFormat;

///
/// Creates a scratch directory pair and a stub executable inside it.
///
fn fixture(test_name: &str, executable_name: &str, script: &str) -> (PathBuf, PathBuf) {
    let root = std::env::temp_dir().join(format!(
        "bench_harness_{test_name}_{}",
        std::process::id()
    ));
    let benchmark_dir = root.join("bench");
    let output_dir = root.join("out");
    std::fs::create_dir_all(benchmark_dir.as_path()).expect("Scratch directory");
    std::fs::create_dir_all(output_dir.as_path()).expect("Scratch directory");

    let executable = benchmark_dir.join(executable_name);
    std::fs::write(executable.as_path(), script).expect("Stub executable");
    std::fs::set_permissions(executable.as_path(), std::fs::Permissions::from_mode(0o755))
        .expect("Stub executable");

    (benchmark_dir, output_dir)
}

fn harness(benchmark_dir: &Path, output_dir: &Path) -> Harness {
    Harness {
        benchmark_dir: benchmark_dir.to_owned(),
        output_dir: output_dir.to_owned(),
        format: OutputFormat::Csv,
        timeout: None,
        cores: 8,
        verbose: false,
    }
}

#[test]
fn fractal_suite_collects_the_full_matrix() {
    let script = "#!/bin/sh\n\
        echo \"Renderizando ${1}x${2}, ${3} iteracoes\"\n\
        echo \"Tempo serial: 2.50s\"\n\
        echo \"Tempo multi-thread: 0.80s\"\n";
    let (benchmark_dir, output_dir) =
        fixture("fractal_full_matrix", "mandelbrot", script);

    let harness = harness(benchmark_dir.as_path(), output_dir.as_path());
    let mut summary = RunSummary::new(true);
    Suite::Mandelbrot
        .run(&harness, &mut summary)
        .expect("Suite completes");

    assert!(summary.has_results());

    let csv = std::fs::read_to_string(output_dir.join("mandelbrot_results.csv"))
        .expect("Tabular artifact");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 1 + 9);
    assert!(lines[0].starts_with("\"resolution\", \"iterations\""));
    assert!(lines[1].contains("3.125"));

    let svg = std::fs::read_to_string(output_dir.join("mandelbrot_analysis.svg"))
        .expect("Chart artifact");
    assert!(svg.starts_with("<svg"));
}

#[test]
fn missing_required_label_skips_every_point_and_still_completes() {
    let script = "#!/bin/sh\n\
        echo \"Tempo serial: 2.50s\"\n";
    let (benchmark_dir, output_dir) =
        fixture("fractal_missing_label", "mandelbrot", script);

    let harness = harness(benchmark_dir.as_path(), output_dir.as_path());
    let mut summary = RunSummary::new(true);
    Suite::Mandelbrot
        .run(&harness, &mut summary)
        .expect("Suite completes despite the missing label");

    assert!(!summary.has_results());

    let csv = std::fs::read_to_string(output_dir.join("mandelbrot_results.csv"))
        .expect("Header-only tabular artifact");
    assert_eq!(csv.lines().count(), 1);
    assert!(!output_dir.join("mandelbrot_analysis.svg").exists());
}

#[test]
fn nonzero_exit_skips_the_point_without_aborting() {
    let script = "#!/bin/sh\n\
        if [ \"$1\" = \"800\" ]; then exit 3; fi\n\
        echo \"Tempo serial: 2.50s\"\n\
        echo \"Tempo multi-thread: 0.80s\"\n";
    let (benchmark_dir, output_dir) =
        fixture("fractal_nonzero_exit", "mandelbrot", script);

    let harness = harness(benchmark_dir.as_path(), output_dir.as_path());
    let mut summary = RunSummary::new(true);
    Suite::Mandelbrot
        .run(&harness, &mut summary)
        .expect("Suite completes");

    let csv = std::fs::read_to_string(output_dir.join("mandelbrot_results.csv"))
        .expect("Tabular artifact");
    assert_eq!(csv.lines().count(), 1 + 6);
    assert!(!csv.contains("800"));
}

#[test]
fn sqrt_suite_derives_speedups_from_the_side_effect_file() {
    let script = "#!/bin/sh\n\
        cat > sqrt_benchmark_results.csv <<EOF\n\
        Distribution,SerialTime,SimdTime,ThreadedTime,SimdThreadedTime,SpeedupSimd,SpeedupThreaded,SpeedupSimdThreaded\n\
        UNIFORM,4.0,2.0,1.0,0.5,2.0,4.0,8.0\n\
        NORMAL,3.0,2.0,1.5,1.0,1.5,2.0,3.0\n\
        EOF\n";
    let (benchmark_dir, output_dir) = fixture("sqrt_side_effect", "sqrt_benchmark", script);

    let harness = harness(benchmark_dir.as_path(), output_dir.as_path());
    let mut summary = RunSummary::new(true);
    Suite::Sqrt
        .run(&harness, &mut summary)
        .expect("Suite completes");

    let csv =
        std::fs::read_to_string(output_dir.join("sqrt_results.csv")).expect("Tabular artifact");
    let uniform_row = csv
        .lines()
        .find(|line| line.contains("UNIFORM"))
        .expect("Row for the first distribution");
    assert!(uniform_row.contains("2, 4, 8"));

    let report =
        std::fs::read_to_string(output_dir.join("sqrt_report.txt")).expect("Narrative artifact");
    assert!(report.contains("DISTRIBUTION: UNIFORM"));

    assert!(output_dir.join("sqrt_analysis.svg").exists());
}

#[test]
fn missing_side_effect_file_yields_an_empty_completed_run() {
    let script = "#!/bin/sh\n\
        echo \"nothing written\"\n";
    let (benchmark_dir, output_dir) =
        fixture("sqrt_missing_artifact", "sqrt_benchmark", script);

    let harness = harness(benchmark_dir.as_path(), output_dir.as_path());
    let mut summary = RunSummary::new(true);
    Suite::Sqrt
        .run(&harness, &mut summary)
        .expect("Suite completes despite the missing artifact");

    assert!(!summary.has_results());
    let csv =
        std::fs::read_to_string(output_dir.join("sqrt_results.csv")).expect("Header-only artifact");
    assert_eq!(csv.lines().count(), 1);
}
