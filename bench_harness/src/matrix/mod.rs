//!
//! The experiment matrix driver.
//!

use itertools::Itertools;

use report_analyzer::AxisValue;
use report_analyzer::ConfigPoint;
use report_analyzer::DerivedRecord;
use report_analyzer::ResultsTable;

use crate::summary::RunSummary;

///
/// One configuration axis: a name and the values swept along it.
///
#[derive(Debug, Clone)]
pub struct Axis {
    /// The axis name.
    pub name: String,
    /// The swept values, in sweep order.
    pub values: Vec<AxisValue>,
}

impl Axis {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(name: &str, values: Vec<AxisValue>) -> Self {
        Self {
            name: name.to_owned(),
            values,
        }
    }
}

///
/// Enumerates the full cross-product of the axes in a fixed, deterministic
/// nested order: the first axis varies slowest. Repeated runs over identical
/// axis definitions therefore produce rows in the same order, which keeps
/// report diffs reproducible.
///
pub fn enumerate(axes: &[Axis]) -> Vec<ConfigPoint> {
    if axes.is_empty() {
        return vec![ConfigPoint::new(Vec::new())];
    }
    axes.iter()
        .map(|axis| {
            axis.values
                .iter()
                .map(|value| (axis.name.clone(), value.clone()))
                .collect::<Vec<(String, AxisValue)>>()
        })
        .multi_cartesian_product()
        .map(ConfigPoint::new)
        .collect()
}

///
/// Runs the matrix: one blocking invocation per configuration point, in
/// enumeration order, with no overlap between points.
///
/// The results table accumulator is owned here exclusively and only ever
/// mutated by appending one record per point. A failed point is logged with
/// its identity and failure kind, permanently skipped, and never retried; a
/// run where every point fails still completes with an empty table.
///
pub fn run_matrix<F>(
    axes: &[Axis],
    axis_columns: Vec<&str>,
    metric_columns: Vec<&str>,
    summary: &mut RunSummary,
    mut per_point: F,
) -> ResultsTable
where
    F: FnMut(&ConfigPoint) -> anyhow::Result<DerivedRecord>,
{
    let mut table = ResultsTable::new(axis_columns, metric_columns);

    for point in enumerate(axes) {
        match per_point(&point) {
            Ok(record) => match table.push(record) {
                Ok(()) => summary.measured(&point),
                Err(error) => summary.skipped(&point, error.to_string()),
            },
            Err(error) => summary.skipped(&point, format!("{error:#}")),
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use report_analyzer::AxisValue;
    use report_analyzer::DerivedRecord;
    use report_analyzer::RawRecord;

    use crate::summary::RunSummary;

    use super::enumerate;
    use super::run_matrix;
    use super::Axis;

    fn axes() -> Vec<Axis> {
        vec![
            Axis::new(
                "resolution",
                vec![AxisValue::Integer(400), AxisValue::Integer(800)],
            ),
            Axis::new(
                "iterations",
                vec![AxisValue::Integer(500), AxisValue::Integer(1000)],
            ),
        ]
    }

    #[test]
    fn outer_axis_varies_slowest() {
        let points: Vec<String> = enumerate(axes().as_slice())
            .into_iter()
            .map(|point| point.to_string())
            .collect();
        assert_eq!(
            points,
            vec![
                "resolution=400 iterations=500",
                "resolution=400 iterations=1000",
                "resolution=800 iterations=500",
                "resolution=800 iterations=1000",
            ]
        );
    }

    #[test]
    fn enumeration_is_deterministic() {
        assert_eq!(enumerate(axes().as_slice()), enumerate(axes().as_slice()));
    }

    #[test]
    fn no_axes_enumerate_a_single_point() {
        let points = enumerate(&[]);
        assert_eq!(points.len(), 1);
        assert!(points[0].coordinates().is_empty());
    }

    #[test]
    fn failed_points_are_skipped_and_the_run_completes() {
        let mut summary = RunSummary::new(true);
        let table = run_matrix(
            axes().as_slice(),
            vec!["resolution", "iterations"],
            vec!["speedup"],
            &mut summary,
            |point| {
                let resolution = point
                    .value("resolution")
                    .and_then(|value| value.as_integer())
                    .expect("Always exists");
                if resolution == 800 {
                    anyhow::bail!("required field `threaded_time` was not found in the output");
                }
                let mut record = DerivedRecord::from_raw(point.clone(), RawRecord::default());
                record.set("speedup", 2.0);
                Ok(record)
            },
        );
        assert_eq!(table.len(), 2);
        assert!(table
            .rows()
            .iter()
            .all(|row| row.point.to_string().contains("resolution=400")));
    }

    #[test]
    fn all_points_failing_yields_an_empty_completed_table() {
        let mut summary = RunSummary::new(true);
        let table = run_matrix(
            axes().as_slice(),
            vec!["resolution", "iterations"],
            vec!["speedup"],
            &mut summary,
            |_point| anyhow::bail!("runner failure"),
        );
        assert!(table.is_empty());
        assert!(!summary.has_results());
    }
}
