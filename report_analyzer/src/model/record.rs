//!
//! Raw and derived measurement records.
//!

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::metrics::MetricError;
use crate::model::point::ConfigPoint;

///
/// A mapping from metric name to a measured value, as produced by an
/// extractor for exactly one configuration point.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// The measured metrics.
    metrics: BTreeMap<String, f64>,
}

impl RawRecord {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(metrics: BTreeMap<String, f64>) -> Self {
        Self { metrics }
    }

    ///
    /// Inserts a measured value.
    ///
    pub fn insert(&mut self, metric: &str, value: f64) {
        self.metrics.insert(metric.to_owned(), value);
    }

    ///
    /// Returns the value of a metric, if present.
    ///
    pub fn get(&self, metric: &str) -> Option<f64> {
        self.metrics.get(metric).copied()
    }

    ///
    /// Returns the value of a metric the caller cannot proceed without.
    ///
    pub fn require(&self, metric: &str) -> Result<f64, MetricError> {
        self.get(metric)
            .ok_or_else(|| MetricError::Unavailable(metric.to_owned()))
    }

    ///
    /// Whether the record carries no metrics at all.
    ///
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    ///
    /// The metric map, consumed.
    ///
    pub fn into_metrics(self) -> BTreeMap<String, f64> {
        self.metrics
    }
}

///
/// A raw record extended with computed fields, bound to its configuration
/// point. One derived record per valid configuration point.
///
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedRecord {
    /// The configuration point this record belongs to.
    pub point: ConfigPoint,
    /// The raw and computed metrics.
    pub metrics: BTreeMap<String, f64>,
}

impl DerivedRecord {
    ///
    /// Starts a derived record from the raw measurements.
    ///
    pub fn from_raw(point: ConfigPoint, raw: RawRecord) -> Self {
        Self {
            point,
            metrics: raw.into_metrics(),
        }
    }

    ///
    /// Adds a computed field.
    ///
    pub fn set(&mut self, metric: &str, value: f64) {
        self.metrics.insert(metric.to_owned(), value);
    }

    ///
    /// Returns a metric value, if present.
    ///
    pub fn get(&self, metric: &str) -> Option<f64> {
        self.metrics.get(metric).copied()
    }

    ///
    /// Returns a metric the caller cannot proceed without.
    ///
    pub fn require(&self, metric: &str) -> Result<f64, MetricError> {
        self.get(metric)
            .ok_or_else(|| MetricError::Unavailable(metric.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::model::point::ConfigPoint;

    use super::DerivedRecord;
    use super::RawRecord;

    #[test]
    fn require_reports_the_missing_metric() {
        let record = RawRecord::default();
        let error = record.require("serial_time").expect_err("Must be missing");
        assert_eq!(error.to_string(), "metric `serial_time` is unavailable");
    }

    #[test]
    fn derived_record_keeps_raw_metrics() {
        let mut metrics = BTreeMap::new();
        metrics.insert("serial_time".to_owned(), 2.5);
        let raw = RawRecord::new(metrics);

        let mut derived =
            DerivedRecord::from_raw(ConfigPoint::labeled("distribution", "UNIFORM"), raw);
        derived.set("speedup", 3.125);

        assert_eq!(derived.get("serial_time"), Some(2.5));
        assert_eq!(derived.get("speedup"), Some(3.125));
    }
}
