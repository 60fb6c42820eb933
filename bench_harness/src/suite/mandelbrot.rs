//!
//! The fractal renderer benchmark suite.
//!

use colored::Colorize;

use report_analyzer::metrics;
use report_analyzer::AxisValue;
use report_analyzer::DerivedRecord;
use report_analyzer::Figure;
use report_analyzer::Narrative;
use report_analyzer::Panel;
use report_analyzer::ResultsTable;
use report_analyzer::Scale;
use report_analyzer::ScatterPoint;
use report_analyzer::Series;

use crate::extract::line_pattern::LineField;
use crate::extract::line_pattern::LineSchema;
use crate::matrix::run_matrix;
use crate::matrix::Axis;
use crate::suite::persist_table;
use crate::suite::render_figure;
use crate::suite::Suite;
use crate::summary::RunSummary;
use crate::Harness;

/// The swept image resolutions; the image is square.
const RESOLUTIONS: [u64; 3] = [400, 800, 1200];

/// The swept iteration counts.
const ITERATION_COUNTS: [u64; 3] = [500, 1000, 2000];

/// The stdout labels; exact substrings are part of the contract with the
/// executable.
const LABEL_SERIAL: &str = "Tempo serial:";
const LABEL_THREADED: &str = "Tempo multi-thread:";
const LABEL_SIMD: &str = "Tempo SIMD:";
const LABEL_SIMD_THREADED: &str = "Tempo SIMD + multi-thread:";

///
/// Runs the resolution × iteration-count matrix against the fractal
/// renderer, extracting times from labeled stdout lines.
///
pub fn run(harness: &Harness, summary: &mut RunSummary) -> anyhow::Result<()> {
    println!(
        "     {} fractal renderer suite",
        "Running".bright_green().bold(),
    );

    let runner = harness.runner(Suite::Mandelbrot.executable_name());
    let schema = LineSchema::new(vec![
        LineField::required("serial_time", LABEL_SERIAL),
        LineField::required("threaded_time", LABEL_THREADED),
        LineField::optional("simd_time", LABEL_SIMD),
        LineField::optional("simd_threaded_time", LABEL_SIMD_THREADED),
    ]);
    let axes = vec![
        Axis::new(
            "resolution",
            RESOLUTIONS.iter().copied().map(AxisValue::Integer).collect(),
        ),
        Axis::new(
            "iterations",
            ITERATION_COUNTS
                .iter()
                .copied()
                .map(AxisValue::Integer)
                .collect(),
        ),
    ];

    let table = run_matrix(
        axes.as_slice(),
        vec!["resolution", "iterations"],
        vec![
            "serial_time",
            "threaded_time",
            "simd_time",
            "simd_threaded_time",
            "speedup",
            "speedup_simd",
            "speedup_simd_threaded",
            "efficiency",
        ],
        summary,
        |point| {
            let resolution = point
                .value("resolution")
                .and_then(AxisValue::as_integer)
                .expect("Always exists");
            let iterations = point
                .value("iterations")
                .and_then(AxisValue::as_integer)
                .expect("Always exists");

            let args = vec![
                resolution.to_string(),
                resolution.to_string(),
                iterations.to_string(),
            ];
            let outcome = runner.invoke(args.as_slice())?;
            if harness.verbose {
                print!("{}", outcome.stdout);
            }
            if !outcome.status.success() {
                anyhow::bail!(
                    "runner exited with {}: {}",
                    outcome.status,
                    outcome.stderr.trim(),
                );
            }

            let raw = schema.extract(outcome.stdout.as_str())?;
            let mut record = DerivedRecord::from_raw(point.clone(), raw);

            let serial = record.require("serial_time")?;
            let threaded = record.require("threaded_time")?;
            let speedup = metrics::speedup(serial, threaded)?;
            record.set("speedup", speedup);
            record.set(
                "efficiency",
                metrics::parallel_efficiency(speedup, harness.cores)?,
            );
            if let Some(simd) = record.get("simd_time") {
                if let Ok(value) = metrics::speedup(serial, simd) {
                    record.set("speedup_simd", value);
                }
            }
            if let Some(combined) = record.get("simd_threaded_time") {
                if let Ok(value) = metrics::speedup(serial, combined) {
                    record.set("speedup_simd_threaded", value);
                }
            }

            Ok(record)
        },
    );

    persist_table(harness, summary, &table, "mandelbrot_results");
    render_figure(
        harness,
        summary,
        &figure(&table, harness.cores),
        "mandelbrot_analysis.svg",
    );
    print!("{}", narrative(&table).render());

    Ok(())
}

///
/// The four-panel analysis figure.
///
fn figure(table: &ResultsTable, cores: usize) -> Figure {
    let resolutions = table.axis_values("resolution");

    let speedup_lines: Vec<Series> = resolutions
        .iter()
        .map(|resolution| Series::Line {
            label: format!("{resolution}x{resolution}"),
            points: table
                .rows_where("resolution", resolution)
                .into_iter()
                .filter_map(|row| {
                    let iterations = row.point.value("iterations")?.as_integer()? as f64;
                    Some((iterations, row.get("speedup")?))
                })
                .collect(),
        })
        .collect();

    let configurations: Vec<String> = table
        .rows()
        .iter()
        .map(|row| {
            let resolution = row
                .point
                .value("resolution")
                .map(|value| value.to_string())
                .unwrap_or_default();
            let iterations = row
                .point
                .value("iterations")
                .map(|value| value.to_string())
                .unwrap_or_default();
            format!("{resolution}px {iterations}it")
        })
        .collect();
    let time_bars = vec![
        Series::Bars {
            label: "serial".to_owned(),
            values: table.rows().iter().map(|row| row.get("serial_time")).collect(),
        },
        Series::Bars {
            label: "multi-thread".to_owned(),
            values: table
                .rows()
                .iter()
                .map(|row| row.get("threaded_time"))
                .collect(),
        },
    ];

    let mean_speedups: Vec<Option<f64>> = resolutions
        .iter()
        .map(|resolution| {
            let speedups: Vec<f64> = table
                .rows_where("resolution", resolution)
                .into_iter()
                .filter_map(|row| row.get("speedup"))
                .collect();
            if speedups.is_empty() {
                None
            } else {
                Some(speedups.iter().sum::<f64>() / speedups.len() as f64)
            }
        })
        .collect();

    let efficiency_points: Vec<ScatterPoint> = table
        .rows()
        .iter()
        .filter_map(|row| {
            Some(ScatterPoint {
                x: row.point.value("resolution")?.as_integer()? as f64,
                y: row.get("efficiency")?,
                hue: row.point.value("iterations")?.as_integer()? as f64,
            })
        })
        .collect();

    Figure::new(
        "Fractal renderer benchmark",
        vec![
            Panel::numeric(
                "Speedup vs iteration count",
                "Iterations",
                "Speedup",
                Scale::Linear,
                Scale::Linear,
                speedup_lines,
            ),
            Panel::categorical(
                "Execution times",
                "Configuration",
                "Seconds",
                configurations,
                time_bars,
            ),
            Panel::categorical(
                "Mean speedup per resolution",
                "Resolution",
                "Speedup",
                resolutions
                    .iter()
                    .map(|resolution| resolution.to_string())
                    .collect(),
                vec![Series::Bars {
                    label: "multi-thread".to_owned(),
                    values: mean_speedups,
                }],
            ),
            Panel::numeric(
                format!("Efficiency ({cores}-core ideal)").as_str(),
                "Resolution",
                "Efficiency (%)",
                Scale::Linear,
                Scale::Linear,
                vec![Series::Scatter {
                    hue_label: "Iterations".to_owned(),
                    points: efficiency_points,
                }],
            ),
        ],
    )
}

///
/// The console narrative.
///
fn narrative(table: &ResultsTable) -> Narrative {
    let mut narrative = Narrative::new("FRACTAL RENDERER RESULTS");
    if table.is_empty() {
        narrative.line("No results obtained.");
        return narrative;
    }

    narrative.section("PER-CONFIGURATION SPEEDUP");
    for row in table.rows().iter() {
        match row.get("speedup") {
            Some(speedup) => narrative.line(format!("{}: speedup = {speedup:.2}x", row.point)),
            None => narrative.line(format!("{}: speedup = n/a", row.point)),
        };
    }
    narrative.blank();
    narrative.statistic("Mean multi-thread speedup", table.mean("speedup"), "x");
    narrative.statistic("Mean efficiency", table.mean("efficiency"), "%");
    narrative
}

#[cfg(test)]
mod tests {
    use report_analyzer::AxisValue;
    use report_analyzer::ConfigPoint;
    use report_analyzer::DerivedRecord;
    use report_analyzer::RawRecord;
    use report_analyzer::ResultsTable;

    fn table_with_speedups() -> ResultsTable {
        let mut table = ResultsTable::new(
            vec!["resolution", "iterations"],
            vec!["serial_time", "threaded_time", "speedup", "efficiency"],
        );
        for (resolution, iterations, speedup) in
            [(400u64, 500u64, 2.0f64), (400, 1000, 2.5), (800, 500, 3.0)]
        {
            let point = ConfigPoint::new(vec![
                ("resolution".to_owned(), AxisValue::Integer(resolution)),
                ("iterations".to_owned(), AxisValue::Integer(iterations)),
            ]);
            let mut record = DerivedRecord::from_raw(point, RawRecord::default());
            record.set("speedup", speedup);
            record.set("efficiency", speedup / 8.0 * 100.0);
            table.push(record).expect("Unique points");
        }
        table
    }

    #[test]
    fn figure_has_four_panels() {
        let figure = super::figure(&table_with_speedups(), 8);
        assert_eq!(figure.panels.len(), 4);
        assert!(figure.render().is_some());
    }

    #[test]
    fn narrative_reports_mean_speedup() {
        let text = super::narrative(&table_with_speedups()).render();
        assert!(text.contains("Mean multi-thread speedup: 2.50x"));
        assert!(text.contains("resolution=400 iterations=500: speedup = 2.00x"));
    }

    #[test]
    fn empty_table_narrative_reports_no_results() {
        let table = ResultsTable::new(vec!["resolution"], vec!["speedup"]);
        let text = super::narrative(&table).render();
        assert!(text.contains("No results obtained."));
    }
}
