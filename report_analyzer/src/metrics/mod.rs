//!
//! Derived-metric computations.
//!
//! All functions here are pure: the derived values are deterministic
//! functions of their raw inputs, so recomputing from an unchanged record
//! always yields bit-identical results.
//!

/// One binary gibibyte, the bandwidth denominator.
const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

///
/// A derived metric that cannot be computed from the raw record.
///
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MetricError {
    /// The metric is missing from the record, or its divisor is not positive.
    #[error("metric `{0}` is unavailable")]
    Unavailable(String),
}

///
/// The ratio of a reference time to a variant time.
///
/// Defined only for a positive variant time: a zero or negative divisor
/// yields `MetricError::Unavailable` so the caller omits the row instead of
/// propagating `Inf` or `NaN` into the artifacts.
///
pub fn speedup(reference_time: f64, variant_time: f64) -> Result<f64, MetricError> {
    if !(variant_time > 0.0) || !reference_time.is_finite() {
        return Err(MetricError::Unavailable("speedup".to_owned()));
    }
    Ok(reference_time / variant_time)
}

///
/// Bytes moved over wall time, in GiB/s.
///
pub fn bandwidth_gib(bytes_moved: f64, seconds: f64) -> Result<f64, MetricError> {
    if !(seconds > 0.0) || !bytes_moved.is_finite() {
        return Err(MetricError::Unavailable("bandwidth".to_owned()));
    }
    Ok(bytes_moved / BYTES_PER_GIB / seconds)
}

///
/// How much of a stronger technique's gain a simpler technique captures,
/// as a percentage. Reported as-is: values above 100 are meaningful here.
///
pub fn relative_efficiency(speedup_variant: f64, speedup_reference: f64) -> Result<f64, MetricError> {
    if !(speedup_reference > 0.0) || !speedup_variant.is_finite() {
        return Err(MetricError::Unavailable("relative_efficiency".to_owned()));
    }
    Ok(speedup_variant / speedup_reference * 100.0)
}

///
/// The fraction of ideal parallel speedup achieved, as a percentage clamped
/// to [0, 100] so charts never show apparent super-linear scaling.
///
pub fn parallel_efficiency(speedup: f64, ideal_factor: usize) -> Result<f64, MetricError> {
    if ideal_factor == 0 || !speedup.is_finite() {
        return Err(MetricError::Unavailable("parallel_efficiency".to_owned()));
    }
    Ok((speedup / ideal_factor as f64 * 100.0).clamp(0.0, 100.0))
}
