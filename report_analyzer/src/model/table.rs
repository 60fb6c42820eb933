//!
//! The results table: the single source of truth handed to persistence and
//! charting.
//!

use serde::Deserialize;
use serde::Serialize;

use crate::model::point::ConfigPoint;
use crate::model::record::DerivedRecord;

///
/// An ordered sequence of derived records with a fixed column order.
///
/// Rows are appended in enumeration order and each configuration point may
/// appear at most once. Columns are declared up front: axis names first, then
/// metric names. A row missing one of the metric columns renders as an empty
/// cell, never as a substituted default.
///
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsTable {
    /// The axis column names, in coordinate order.
    axis_columns: Vec<String>,
    /// The metric column names, in declaration order.
    metric_columns: Vec<String>,
    /// The rows, in enumeration order.
    rows: Vec<DerivedRecord>,
}

impl ResultsTable {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(axis_columns: Vec<&str>, metric_columns: Vec<&str>) -> Self {
        Self {
            axis_columns: axis_columns.into_iter().map(str::to_owned).collect(),
            metric_columns: metric_columns.into_iter().map(str::to_owned).collect(),
            rows: Vec::new(),
        }
    }

    ///
    /// Appends a record, enforcing configuration point uniqueness.
    ///
    pub fn push(&mut self, record: DerivedRecord) -> anyhow::Result<()> {
        if self.rows.iter().any(|row| row.point == record.point) {
            anyhow::bail!("Duplicate configuration point `{}`", record.point);
        }
        self.rows.push(record);
        Ok(())
    }

    ///
    /// The axis column names.
    ///
    pub fn axis_columns(&self) -> &[String] {
        self.axis_columns.as_slice()
    }

    ///
    /// The metric column names.
    ///
    pub fn metric_columns(&self) -> &[String] {
        self.metric_columns.as_slice()
    }

    ///
    /// The rows, in enumeration order.
    ///
    pub fn rows(&self) -> &[DerivedRecord] {
        self.rows.as_slice()
    }

    ///
    /// Whether the table holds no rows.
    ///
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    ///
    /// The number of rows.
    ///
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    ///
    /// The mean of a metric over the rows that carry it.
    ///
    /// Returns `None` when no row carries the metric, so an absent column is
    /// reported as absent instead of as zero.
    ///
    pub fn mean(&self, metric: &str) -> Option<f64> {
        let values: Vec<f64> = self
            .rows
            .iter()
            .filter_map(|row| row.get(metric))
            .collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    ///
    /// The maximum of a metric over the rows that carry it.
    ///
    pub fn max(&self, metric: &str) -> Option<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.get(metric))
            .fold(None, |max, value| match max {
                Some(current) if current >= value => Some(current),
                _ => Some(value),
            })
    }

    ///
    /// The distinct values on an axis, in first-seen order.
    ///
    pub fn axis_values(&self, axis: &str) -> Vec<crate::model::point::AxisValue> {
        let mut values = Vec::new();
        for row in self.rows.iter() {
            if let Some(value) = row.point.value(axis) {
                if !values.contains(value) {
                    values.push(value.clone());
                }
            }
        }
        values
    }

    ///
    /// The rows whose point carries the given value on the given axis.
    ///
    pub fn rows_where(
        &self,
        axis: &str,
        value: &crate::model::point::AxisValue,
    ) -> Vec<&DerivedRecord> {
        self.rows
            .iter()
            .filter(|row| row.point.value(axis) == Some(value))
            .collect()
    }

    ///
    /// Whether the table already holds a row for the point.
    ///
    pub fn contains(&self, point: &ConfigPoint) -> bool {
        self.rows.iter().any(|row| &row.point == point)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::point::AxisValue;
    use crate::model::point::ConfigPoint;
    use crate::model::record::DerivedRecord;
    use crate::model::record::RawRecord;

    use super::ResultsTable;

    fn record(axis: &str, label: &str, metric: &str, value: f64) -> DerivedRecord {
        let mut derived =
            DerivedRecord::from_raw(ConfigPoint::labeled(axis, label), RawRecord::default());
        derived.set(metric, value);
        derived
    }

    #[test]
    fn duplicate_points_are_rejected() {
        let mut table = ResultsTable::new(vec!["distribution"], vec!["speedup"]);
        table
            .push(record("distribution", "UNIFORM", "speedup", 2.0))
            .expect("First insertion");
        let error = table
            .push(record("distribution", "UNIFORM", "speedup", 3.0))
            .expect_err("Duplicate point");
        assert!(error.to_string().contains("UNIFORM"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn mean_ignores_rows_without_the_metric() {
        let mut table = ResultsTable::new(vec!["distribution"], vec!["speedup"]);
        table
            .push(record("distribution", "UNIFORM", "speedup", 2.0))
            .expect("Insertion");
        table
            .push(record("distribution", "NORMAL", "other", 10.0))
            .expect("Insertion");
        assert_eq!(table.mean("speedup"), Some(2.0));
        assert_eq!(table.mean("missing"), None);
    }

    #[test]
    fn axis_values_preserve_first_seen_order() {
        let mut table = ResultsTable::new(vec!["distribution"], vec!["speedup"]);
        for label in ["SPARSE", "UNIFORM", "NORMAL"] {
            table
                .push(record("distribution", label, "speedup", 1.0))
                .expect("Insertion");
        }
        let values: Vec<String> = table
            .axis_values("distribution")
            .into_iter()
            .map(|value| value.to_string())
            .collect();
        assert_eq!(values, vec!["SPARSE", "UNIFORM", "NORMAL"]);
    }

    #[test]
    fn empty_table_reports_no_statistics() {
        let table = ResultsTable::new(vec!["distribution"], vec!["speedup"]);
        assert!(table.is_empty());
        assert_eq!(table.mean("speedup"), None);
        assert_eq!(table.max("speedup"), None);
    }

    #[test]
    fn contains_matches_by_point() {
        let mut table = ResultsTable::new(vec!["size"], vec!["serial_time"]);
        let point = ConfigPoint::new(vec![("size".to_owned(), AxisValue::Integer(1000))]);
        table
            .push(DerivedRecord::from_raw(point.clone(), RawRecord::default()))
            .expect("Insertion");
        assert!(table.contains(&point));
    }
}
