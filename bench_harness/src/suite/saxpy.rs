//!
//! The SAXPY kernel benchmark suite.
//!

use colored::Colorize;

use report_analyzer::metrics;
use report_analyzer::AxisValue;
use report_analyzer::ConfigPoint;
use report_analyzer::DerivedRecord;
use report_analyzer::Figure;
use report_analyzer::Narrative;
use report_analyzer::Panel;
use report_analyzer::RawRecord;
use report_analyzer::ResultsTable;
use report_analyzer::Scale;
use report_analyzer::Series;

use crate::extract::table_file::TableSchema;
use crate::suite::persist_table;
use crate::suite::render_figure;
use crate::suite::write_narrative;
use crate::suite::Suite;
use crate::summary::RunSummary;
use crate::Harness;

/// The side-effect files the executable writes; names and column headers are
/// part of the contract with the executable.
const RESULTS_FILE: &str = "saxpy_results.csv";
const SCALABILITY_FILE: &str = "saxpy_scalability.csv";

/// The main table columns.
const COLUMN_IMPLEMENTATION: &str = "Implementação";
const COLUMN_TIME: &str = "Tempo(s)";
const COLUMN_BANDWIDTH: &str = "Bandwidth(GB/s)";
const COLUMN_SPEEDUP: &str = "Speedup";
const COLUMN_EFFICIENCY: &str = "Eficiência(%)";

/// The implementation labels carrying the baselines.
const SERIAL_LABEL: &str = "Serial";
const COMBINED_LABEL: &str = "SIMD+Multi-thread";

/// Bytes moved per vector element: the two input streams and the result.
const BYTES_PER_ELEMENT: f64 = 4.0 * 3.0;

/// One binary gibibyte, for the swept-size axis of the scalability charts.
const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

///
/// Runs the single self-parameterized SAXPY invocation and extracts both
/// structured side-effect files.
///
pub fn run(harness: &Harness, summary: &mut RunSummary) -> anyhow::Result<()> {
    println!(
        "     {} SAXPY kernel suite",
        "Running".bright_green().bold(),
    );

    let runner = harness.runner(Suite::Saxpy.executable_name());
    let invocation = ConfigPoint::labeled("suite", "saxpy");
    let outcome = match runner.invoke(&[]) {
        Ok(outcome) => outcome,
        Err(error) => {
            summary.skipped(&invocation, error.to_string());
            return Ok(());
        }
    };
    if harness.verbose {
        print!("{}", outcome.stdout);
    }
    if !outcome.status.success() {
        summary.skipped(
            &invocation,
            format!(
                "runner exited with {}: {}",
                outcome.status,
                outcome.stderr.trim(),
            ),
        );
        return Ok(());
    }

    let summary_table = read_summary_table(harness, summary);
    let scaling_table = read_scaling_table(harness, summary);

    persist_table(harness, summary, &summary_table, "saxpy_summary");
    persist_table(harness, summary, &scaling_table, "saxpy_scaling");
    render_figure(
        harness,
        summary,
        &figure(&summary_table, &scaling_table),
        "saxpy_analysis.svg",
    );

    let narrative = narrative(&summary_table, &scaling_table);
    let text = narrative.render();
    print!("{text}");
    write_narrative(harness, summary, text.as_str(), "saxpy_report.txt");

    Ok(())
}

///
/// Reads the per-implementation table and derives speedups against the
/// serial row, bandwidth gains, and efficiency against the combined
/// technique.
///
fn read_summary_table(harness: &Harness, summary: &mut RunSummary) -> ResultsTable {
    let mut table = ResultsTable::new(
        vec!["implementation"],
        vec![
            "time",
            "bandwidth",
            "speedup",
            "bandwidth_gain",
            "efficiency",
        ],
    );

    let schema = TableSchema::new(
        Some(COLUMN_IMPLEMENTATION),
        vec![
            COLUMN_TIME,
            COLUMN_BANDWIDTH,
            COLUMN_SPEEDUP,
            COLUMN_EFFICIENCY,
        ],
    );
    let path = harness.side_effect_path(RESULTS_FILE);
    let rows = match schema.read(path.as_path()) {
        Ok(rows) => rows,
        Err(error) => {
            summary.skipped(
                &ConfigPoint::labeled("artifact", RESULTS_FILE),
                error.to_string(),
            );
            return table;
        }
    };

    let time_of = |label: &str| -> Option<f64> {
        rows.iter()
            .find(|row| row.label.as_deref() == Some(label))
            .and_then(|row| row.record.get(COLUMN_TIME))
    };
    let serial_time = time_of(SERIAL_LABEL);
    let combined_time = time_of(COMBINED_LABEL);
    let serial_bandwidth = rows
        .iter()
        .find(|row| row.label.as_deref() == Some(SERIAL_LABEL))
        .and_then(|row| row.record.get(COLUMN_BANDWIDTH));

    for row in rows.iter() {
        let label = match row.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => continue,
        };
        let point = ConfigPoint::labeled("implementation", label);

        let time = match row.record.get(COLUMN_TIME) {
            Some(time) => time,
            None => {
                summary.skipped(
                    &point,
                    format!("required field `{COLUMN_TIME}` was not found in the output"),
                );
                continue;
            }
        };

        let mut record = DerivedRecord::from_raw(point.clone(), RawRecord::default());
        record.set("time", time);
        if let Some(bandwidth) = row.record.get(COLUMN_BANDWIDTH) {
            record.set("bandwidth", bandwidth);
            match serial_bandwidth {
                Some(serial) if serial > 0.0 => record.set("bandwidth_gain", bandwidth / serial),
                _ => {}
            }
        }
        if let Some(serial) = serial_time {
            if let Ok(speedup) = metrics::speedup(serial, time) {
                record.set("speedup", speedup);
                if let Some(combined) = combined_time {
                    if let Ok(combined_speedup) = metrics::speedup(serial, combined) {
                        if let Ok(efficiency) =
                            metrics::relative_efficiency(speedup, combined_speedup)
                        {
                            record.set("efficiency", efficiency);
                        }
                    }
                }
            }
        }

        match table.push(record) {
            Ok(()) => summary.measured(&point),
            Err(error) => summary.skipped(&point, error.to_string()),
        }
    }

    table
}

///
/// Reads the swept-size table and derives per-size speedups and bandwidth
/// from the data volume.
///
fn read_scaling_table(harness: &Harness, summary: &mut RunSummary) -> ResultsTable {
    let mut table = ResultsTable::new(
        vec!["size"],
        vec![
            "serial_time",
            "simd_time",
            "threaded_time",
            "simd_threaded_time",
            "serial_bw",
            "simd_bw",
            "threaded_bw",
            "simd_threaded_bw",
            "speedup_simd",
            "speedup_threaded",
            "speedup_simd_threaded",
        ],
    );

    let schema = TableSchema::new(
        None,
        vec![
            "Tamanho",
            "SerialTime",
            "SIMDTime",
            "ThreadedTime",
            "SIMDThreadedTime",
            "SerialBW",
            "SIMDBW",
            "ThreadedBW",
            "SIMDThreadedBW",
        ],
    );
    let path = harness.side_effect_path(SCALABILITY_FILE);
    let rows = match schema.read(path.as_path()) {
        Ok(rows) => rows,
        Err(error) => {
            summary.skipped(
                &ConfigPoint::labeled("artifact", SCALABILITY_FILE),
                error.to_string(),
            );
            return table;
        }
    };

    for row in rows.iter() {
        let size = match row.record.get("Tamanho") {
            Some(size) if size > 0.0 => size as u64,
            _ => {
                summary.skipped(
                    &ConfigPoint::labeled("artifact", SCALABILITY_FILE),
                    "required field `Tamanho` was not found in the output".to_owned(),
                );
                continue;
            }
        };
        let point = ConfigPoint::new(vec![("size".to_owned(), AxisValue::Integer(size))]);

        let times = [
            ("serial_time", "SerialTime", "serial_bw"),
            ("simd_time", "SIMDTime", "simd_bw"),
            ("threaded_time", "ThreadedTime", "threaded_bw"),
            ("simd_threaded_time", "SIMDThreadedTime", "simd_threaded_bw"),
        ];
        let mut record = DerivedRecord::from_raw(point.clone(), RawRecord::default());
        let mut missing = None;
        for (metric, column, _bw) in times {
            match row.record.get(column) {
                Some(value) => record.set(metric, value),
                None => {
                    missing = Some(column);
                    break;
                }
            }
        }
        if let Some(column) = missing {
            summary.skipped(
                &point,
                format!("required field `{column}` was not found in the output"),
            );
            continue;
        }

        let bytes = size as f64 * BYTES_PER_ELEMENT;
        for (metric, _column, bw_metric) in times {
            let time = record.get(metric).expect("Set above");
            if let Ok(bandwidth) = metrics::bandwidth_gib(bytes, time) {
                record.set(bw_metric, bandwidth);
            }
        }

        let serial = record.get("serial_time").expect("Set above");
        for (variant, speedup_metric) in [
            ("simd_time", "speedup_simd"),
            ("threaded_time", "speedup_threaded"),
            ("simd_threaded_time", "speedup_simd_threaded"),
        ] {
            let time = record.get(variant).expect("Set above");
            if let Ok(speedup) = metrics::speedup(serial, time) {
                record.set(speedup_metric, speedup);
            }
        }

        match table.push(record) {
            Ok(()) => summary.measured(&point),
            Err(error) => summary.skipped(&point, error.to_string()),
        }
    }

    table
}

///
/// The four-panel analysis figure.
///
fn figure(summary_table: &ResultsTable, scaling_table: &ResultsTable) -> Figure {
    let implementations: Vec<String> = summary_table
        .axis_values("implementation")
        .into_iter()
        .map(|value| value.to_string())
        .collect();

    let speedup_bars = Series::Bars {
        label: "vs serial".to_owned(),
        values: summary_table
            .rows()
            .iter()
            .map(|row| row.get("speedup"))
            .collect(),
    };
    let bandwidth_bars = Series::Bars {
        label: "GB/s".to_owned(),
        values: summary_table
            .rows()
            .iter()
            .map(|row| row.get("bandwidth"))
            .collect(),
    };

    let size_gib = |row: &report_analyzer::DerivedRecord| -> Option<f64> {
        let size = row.point.value("size")?.as_integer()? as f64;
        Some(size * BYTES_PER_ELEMENT / BYTES_PER_GIB)
    };
    let scaling_series = |metric: &str, label: &str| -> Series {
        Series::Line {
            label: label.to_owned(),
            points: scaling_table
                .rows()
                .iter()
                .filter_map(|row| Some((size_gib(row)?, row.get(metric)?)))
                .collect(),
        }
    };

    Figure::new(
        "SAXPY kernel benchmark",
        vec![
            Panel::categorical(
                "Speedup per implementation",
                "Implementation",
                "Speedup",
                implementations.clone(),
                vec![speedup_bars],
            ),
            Panel::categorical(
                "Memory bandwidth per implementation",
                "Implementation",
                "Bandwidth (GB/s)",
                implementations,
                vec![bandwidth_bars],
            ),
            Panel::numeric(
                "Time scaling with data size",
                "Data size (GiB)",
                "Seconds",
                Scale::Log,
                Scale::Log,
                vec![
                    scaling_series("serial_time", "serial"),
                    scaling_series("simd_time", "SIMD"),
                    scaling_series("threaded_time", "multi-thread"),
                    scaling_series("simd_threaded_time", "SIMD+threads"),
                ],
            ),
            Panel::numeric(
                "Bandwidth scaling with data size",
                "Data size (GiB)",
                "Bandwidth (GiB/s)",
                Scale::Log,
                Scale::Linear,
                vec![
                    scaling_series("serial_bw", "serial"),
                    scaling_series("simd_bw", "SIMD"),
                    scaling_series("threaded_bw", "multi-thread"),
                    scaling_series("simd_threaded_bw", "SIMD+threads"),
                ],
            ),
        ],
    )
}

///
/// The narrative report, also persisted as a text artifact.
///
fn narrative(summary_table: &ResultsTable, scaling_table: &ResultsTable) -> Narrative {
    let mut narrative = Narrative::new("SAXPY ANALYSIS REPORT");
    if summary_table.is_empty() && scaling_table.is_empty() {
        narrative.line("No results obtained.");
        return narrative;
    }

    narrative.section("MAIN RESULTS");
    for row in summary_table.rows().iter() {
        let label = row
            .point
            .value("implementation")
            .map(|value| value.to_string())
            .unwrap_or_default();
        let speedup = row
            .get("speedup")
            .map(|value| format!("{value:.2}x"))
            .unwrap_or_else(|| "n/a".to_owned());
        let bandwidth = row
            .get("bandwidth")
            .map(|value| format!("{value:.2} GB/s"))
            .unwrap_or_else(|| "n/a".to_owned());
        narrative.line(format!("{label}: speedup={speedup}, bandwidth={bandwidth}"));
    }

    narrative.section("SCALABILITY");
    narrative.statistic(
        "Mean SIMD speedup",
        scaling_table.mean("speedup_simd"),
        "x",
    );
    narrative.statistic(
        "Mean multi-thread speedup",
        scaling_table.mean("speedup_threaded"),
        "x",
    );
    narrative.statistic(
        "Mean combined speedup",
        scaling_table.mean("speedup_simd_threaded"),
        "x",
    );
    let peak_bandwidth = ["serial_bw", "simd_bw", "threaded_bw", "simd_threaded_bw"]
        .into_iter()
        .filter_map(|metric| scaling_table.max(metric))
        .fold(None, |max: Option<f64>, value| match max {
            Some(current) if current >= value => Some(current),
            _ => Some(value),
        });
    narrative.statistic("Peak bandwidth", peak_bandwidth, " GiB/s");

    narrative.section("OBSERVATIONS");
    narrative.line("1. The kernel streams three arrays per element and is bound by memory bandwidth.");
    narrative.line("2. SIMD alone gains little once the memory system saturates.");
    narrative.line("3. Threads help saturate the available bandwidth; the combination uses both.");

    narrative
}
