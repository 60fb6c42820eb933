//!
//! Line-pattern extraction from captured standard output.
//!

use once_cell::sync::Lazy;
use regex::Regex;

use report_analyzer::RawRecord;

use crate::extract::error::ExtractionError;

/// The first numeric token after a label, with any unit suffix left behind.
static NUMERIC_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-+]?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?").expect("Valid regex"));

///
/// One recognized labeled line: the label substring identifying it and the
/// metric its numeric value is stored under.
///
#[derive(Debug, Clone)]
pub struct LineField {
    /// The metric name in the raw record.
    pub metric: &'static str,
    /// The label substring recognizing the line. Part of the external
    /// contract with the executable.
    pub label: &'static str,
    /// Whether extraction fails without this field.
    pub required: bool,
}

impl LineField {
    ///
    /// A shortcut constructor for a required field.
    ///
    pub fn required(metric: &'static str, label: &'static str) -> Self {
        Self {
            metric,
            label,
            required: true,
        }
    }

    ///
    /// A shortcut constructor for an optional field.
    ///
    pub fn optional(metric: &'static str, label: &'static str) -> Self {
        Self {
            metric,
            label,
            required: false,
        }
    }
}

///
/// An explicit extraction schema: a finite set of recognized label strings
/// mapped to typed numeric fields, so a contract mismatch is a well-defined
/// `MissingField` error rather than a silent misparse.
///
#[derive(Debug, Clone)]
pub struct LineSchema {
    /// The recognized fields.
    fields: Vec<LineField>,
}

impl LineSchema {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(fields: Vec<LineField>) -> Self {
        Self { fields }
    }

    ///
    /// Scans the captured standard output line by line.
    ///
    /// A line is recognized by its label substring; the first numeric token
    /// after the label is the value, with unit suffixes such as a trailing
    /// `s` left unparsed. Unrecognized lines are ignored. A malformed token
    /// leaves the field unseen, so a required field degrades to
    /// `MissingField` instead of corrupting the record. The first sighting
    /// of a field wins.
    ///
    pub fn extract(&self, stdout: &str) -> Result<RawRecord, ExtractionError> {
        let mut record = RawRecord::default();

        for line in stdout.lines() {
            for field in self.fields.iter() {
                if record.get(field.metric).is_some() {
                    continue;
                }
                let position = match line.find(field.label) {
                    Some(position) => position,
                    None => continue,
                };
                let tail = &line[position + field.label.len()..];
                if let Some(token) = NUMERIC_TOKEN.find(tail) {
                    if let Ok(value) = token.as_str().parse::<f64>() {
                        record.insert(field.metric, value);
                    }
                }
                break;
            }
        }

        for field in self.fields.iter() {
            if field.required && record.get(field.metric).is_none() {
                return Err(ExtractionError::MissingField(field.metric.to_owned()));
            }
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use crate::extract::error::ExtractionError;

    use super::LineField;
    use super::LineSchema;

    fn schema() -> LineSchema {
        LineSchema::new(vec![
            LineField::required("serial_time", "Tempo serial:"),
            LineField::required("threaded_time", "Tempo multi-thread:"),
            LineField::optional("simd_time", "Tempo SIMD:"),
        ])
    }

    #[test]
    fn extracts_labeled_values_with_unit_suffixes() {
        let stdout = "Renderizando imagem...\nTempo serial: 2.50s\nTempo multi-thread: 0.80s\n";
        let record = schema().extract(stdout).expect("Both labels present");
        assert_eq!(record.get("serial_time"), Some(2.5));
        assert_eq!(record.get("threaded_time"), Some(0.8));
        assert_eq!(record.get("simd_time"), None);
    }

    #[test]
    fn missing_required_label_is_a_missing_field() {
        let stdout = "Tempo serial: 2.50s\n";
        let error = schema().extract(stdout).expect_err("Threaded time absent");
        assert!(matches!(error, ExtractionError::MissingField(field) if field == "threaded_time"));
    }

    #[test]
    fn malformed_token_degrades_to_missing_field() {
        let stdout = "Tempo serial: banana\nTempo multi-thread: 0.80s\n";
        let error = schema().extract(stdout).expect_err("Serial time malformed");
        assert!(matches!(error, ExtractionError::MissingField(field) if field == "serial_time"));
    }

    #[test]
    fn optional_fields_do_not_fail_extraction() {
        let stdout = "Tempo serial: 4.0s\nTempo SIMD: 2.0s\nTempo multi-thread: 1.0s\n";
        let record = schema().extract(stdout).expect("Required labels present");
        assert_eq!(record.get("simd_time"), Some(2.0));
    }

    #[test]
    fn similar_labels_do_not_collide() {
        let schema = LineSchema::new(vec![
            LineField::required("simd_time", "Tempo SIMD:"),
            LineField::required("simd_threaded_time", "Tempo SIMD + multi-thread:"),
        ]);
        let stdout = "Tempo SIMD: 2.0s\nTempo SIMD + multi-thread: 0.5s\n";
        let record = schema.extract(stdout).expect("Both labels present");
        assert_eq!(record.get("simd_time"), Some(2.0));
        assert_eq!(record.get("simd_threaded_time"), Some(0.5));
    }

    #[test]
    fn first_sighting_wins() {
        let stdout = "Tempo serial: 1.0s\nTempo serial: 9.0s\nTempo multi-thread: 0.5s\n";
        let record = schema().extract(stdout).expect("Labels present");
        assert_eq!(record.get("serial_time"), Some(1.0));
    }
}
