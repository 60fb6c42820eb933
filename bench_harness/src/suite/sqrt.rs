//!
//! The square-root kernel benchmark suite.
//!

use colored::Colorize;

use report_analyzer::metrics;
use report_analyzer::ConfigPoint;
use report_analyzer::DerivedRecord;
use report_analyzer::Figure;
use report_analyzer::Narrative;
use report_analyzer::Panel;
use report_analyzer::RawRecord;
use report_analyzer::ResultsTable;
use report_analyzer::Series;

use crate::extract::table_file::TableSchema;
use crate::suite::persist_table;
use crate::suite::render_figure;
use crate::suite::write_narrative;
use crate::suite::Suite;
use crate::summary::RunSummary;
use crate::Harness;

/// The side-effect file the executable writes; name and column header are
/// part of the contract with the executable.
const RESULTS_FILE: &str = "sqrt_benchmark_results.csv";

/// The label column of the side-effect file.
const COLUMN_DISTRIBUTION: &str = "Distribution";

/// The technique names, in chart order.
const TECHNIQUES: [(&str, &str); 3] = [
    ("speedup_simd", "SIMD"),
    ("speedup_threaded", "Multi-thread"),
    ("speedup_simd_threaded", "SIMD+Multi-thread"),
];

///
/// Runs the single self-parameterized square-root invocation and extracts
/// the per-distribution table.
///
pub fn run(harness: &Harness, summary: &mut RunSummary) -> anyhow::Result<()> {
    println!(
        "     {} square-root kernel suite",
        "Running".bright_green().bold(),
    );

    let runner = harness.runner(Suite::Sqrt.executable_name());
    let invocation = ConfigPoint::labeled("suite", "sqrt");
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

    let table = read_table(harness, summary);

    persist_table(harness, summary, &table, "sqrt_results");
    render_figure(harness, summary, &figure(&table), "sqrt_analysis.svg");

    let narrative = narrative(&table);
    let text = narrative.render();
    print!("{text}");
    write_narrative(harness, summary, text.as_str(), "sqrt_report.txt");

    Ok(())
}

///
/// Reads the per-distribution table and derives speedups from the raw times
/// and relative efficiencies against the combined technique.
///
/// The file's own speedup columns are validated as part of the schema but
/// recomputed from the times, keeping every derived value a deterministic
/// function of the raw fields.
///
fn read_table(harness: &Harness, summary: &mut RunSummary) -> ResultsTable {
    let mut table = ResultsTable::new(
        vec!["distribution"],
        vec![
            "serial_time",
            "simd_time",
            "threaded_time",
            "simd_threaded_time",
            "speedup_simd",
            "speedup_threaded",
            "speedup_simd_threaded",
            "efficiency_simd",
            "efficiency_threaded",
        ],
    );

    let schema = TableSchema::new(
        Some(COLUMN_DISTRIBUTION),
        vec![
            "SerialTime",
            "SimdTime",
            "ThreadedTime",
            "SimdThreadedTime",
            "SpeedupSimd",
            "SpeedupThreaded",
            "SpeedupSimdThreaded",
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

    for row in rows.iter() {
        let label = match row.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => continue,
        };
        let point = ConfigPoint::labeled("distribution", label);

        let times = [
            ("serial_time", "SerialTime"),
            ("simd_time", "SimdTime"),
            ("threaded_time", "ThreadedTime"),
            ("simd_threaded_time", "SimdThreadedTime"),
        ];
        let mut record = DerivedRecord::from_raw(point.clone(), RawRecord::default());
        let mut missing = None;
        for (metric, column) in times {
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
        if let Some(combined) = record.get("speedup_simd_threaded") {
            for (speedup_metric, efficiency_metric) in [
                ("speedup_simd", "efficiency_simd"),
                ("speedup_threaded", "efficiency_threaded"),
            ] {
                if let Some(speedup) = record.get(speedup_metric) {
                    if let Ok(efficiency) = metrics::relative_efficiency(speedup, combined) {
                        record.set(efficiency_metric, efficiency);
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
/// The four-panel analysis figure.
///
fn figure(table: &ResultsTable) -> Figure {
    let distributions: Vec<String> = table
        .axis_values("distribution")
        .into_iter()
        .map(|value| value.to_string())
        .collect();

    let column = |metric: &str| -> Vec<Option<f64>> {
        table.rows().iter().map(|row| row.get(metric)).collect()
    };

    let time_bars = vec![
        Series::Bars {
            label: "serial".to_owned(),
            values: column("serial_time"),
        },
        Series::Bars {
            label: "SIMD".to_owned(),
            values: column("simd_time"),
        },
        Series::Bars {
            label: "multi-thread".to_owned(),
            values: column("threaded_time"),
        },
        Series::Bars {
            label: "SIMD+threads".to_owned(),
            values: column("simd_threaded_time"),
        },
    ];

    let speedup_lines: Vec<Series> = TECHNIQUES
        .into_iter()
        .map(|(metric, label)| Series::Line {
            label: label.to_owned(),
            points: table
                .rows()
                .iter()
                .enumerate()
                .filter_map(|(index, row)| Some((index as f64, row.get(metric)?)))
                .collect(),
        })
        .collect();

    let mean_speedups: Vec<Option<f64>> = TECHNIQUES
        .into_iter()
        .map(|(metric, _label)| table.mean(metric))
        .collect();

    let efficiency_bars = vec![
        Series::Bars {
            label: "SIMD".to_owned(),
            values: column("efficiency_simd"),
        },
        Series::Bars {
            label: "multi-thread".to_owned(),
            values: column("efficiency_threaded"),
        },
    ];

    Figure::new(
        "Square-root kernel benchmark",
        vec![
            Panel::categorical(
                "Execution times per distribution",
                "Distribution",
                "Seconds",
                distributions.clone(),
                time_bars,
            ),
            Panel::categorical(
                "Speedup per distribution",
                "Distribution",
                "Speedup",
                distributions.clone(),
                speedup_lines,
            ),
            Panel::categorical(
                "Mean speedup per technique",
                "Technique",
                "Speedup",
                TECHNIQUES
                    .into_iter()
                    .map(|(_metric, label)| label.to_owned())
                    .collect(),
                vec![Series::Bars {
                    label: "mean".to_owned(),
                    values: mean_speedups,
                }],
            ),
            Panel::categorical(
                "Relative efficiency per distribution",
                "Distribution",
                "Efficiency (%)",
                distributions,
                efficiency_bars,
            ),
        ],
    )
}

///
/// The narrative report, also persisted as a text artifact.
///
fn narrative(table: &ResultsTable) -> Narrative {
    let mut narrative = Narrative::new("SQUARE-ROOT KERNEL ANALYSIS");
    if table.is_empty() {
        narrative.line("No results obtained.");
        return narrative;
    }

    narrative.section("MEAN SPEEDUPS");
    for (metric, label) in TECHNIQUES {
        narrative.statistic(
            format!("Mean {label} speedup").as_str(),
            table.mean(metric),
            "x",
        );
    }

    narrative.section("PER-DISTRIBUTION DETAIL");
    for row in table.rows().iter() {
        let label = row
            .point
            .value("distribution")
            .map(|value| value.to_string())
            .unwrap_or_default();
        narrative.line(format!("DISTRIBUTION: {label}"));
        for (metric, technique) in TECHNIQUES {
            match row.get(metric) {
                Some(speedup) => {
                    narrative.line(format!("  {technique} speedup: {speedup:.2}x"))
                }
                None => narrative.line(format!("  {technique} speedup: n/a")),
            };
        }
        for (metric, technique) in [
            ("efficiency_simd", "SIMD"),
            ("efficiency_threaded", "Multi-thread"),
        ] {
            if let Some(efficiency) = row.get(metric) {
                narrative.line(format!("  {technique} efficiency: {efficiency:.1}%"));
            }
        }
    }

    narrative
}

#[cfg(test)]
mod tests {
    use report_analyzer::ConfigPoint;
    use report_analyzer::DerivedRecord;
    use report_analyzer::RawRecord;
    use report_analyzer::ResultsTable;

    fn table_with_distributions() -> ResultsTable {
        let mut table = ResultsTable::new(
            vec!["distribution"],
            vec![
                "serial_time",
                "speedup_simd",
                "speedup_threaded",
                "speedup_simd_threaded",
                "efficiency_simd",
                "efficiency_threaded",
            ],
        );
        for (label, simd, threaded, combined) in
            [("UNIFORM", 2.0f64, 4.0f64, 8.0f64), ("NORMAL", 1.8, 3.6, 7.0)]
        {
            let point = ConfigPoint::labeled("distribution", label);
            let mut record = DerivedRecord::from_raw(point, RawRecord::default());
            record.set("serial_time", 4.0);
            record.set("speedup_simd", simd);
            record.set("speedup_threaded", threaded);
            record.set("speedup_simd_threaded", combined);
            record.set("efficiency_simd", simd / combined * 100.0);
            record.set("efficiency_threaded", threaded / combined * 100.0);
            table.push(record).expect("Unique points");
        }
        table
    }

    #[test]
    fn figure_has_four_panels() {
        let figure = super::figure(&table_with_distributions());
        assert_eq!(figure.panels.len(), 4);
        assert!(figure.render().is_some());
    }

    #[test]
    fn narrative_reports_means_and_detail() {
        let text = super::narrative(&table_with_distributions()).render();
        assert!(text.contains("Mean SIMD speedup: 1.90x"));
        assert!(text.contains("DISTRIBUTION: UNIFORM"));
        assert!(text.contains("SIMD efficiency: 25.0%"));
    }

    #[test]
    fn empty_table_reports_no_results() {
        let table = ResultsTable::new(vec!["distribution"], vec!["speedup_simd"]);
        let text = super::narrative(&table).render();
        assert!(text.contains("No results obtained."));
    }
}
