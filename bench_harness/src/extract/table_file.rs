//!
//! Structured-file extraction from executables' delimited side-effect files.
//!

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use report_analyzer::RawRecord;

use crate::extract::error::ExtractionError;

/// Everything that is not part of a numeric literal: embedded units and
/// symbols are stripped from a cell before parsing.
static DECORATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.eE+-]").expect("Valid regex"));

///
/// One data row of a structured file: the optional categorical label and the
/// numeric cells that survived sanitization.
///
#[derive(Debug)]
pub struct TableRow {
    /// The categorical label, when the schema declares a label column.
    pub label: Option<String>,
    /// The numeric cells; unparseable cells are simply absent.
    pub record: RawRecord,
}

///
/// The declared column schema of a structured side-effect file: at most one
/// leading categorical label column plus named numeric columns.
///
#[derive(Debug, Clone)]
pub struct TableSchema {
    /// The label column name, if the file has one.
    label_column: Option<&'static str>,
    /// The numeric column names, in file order.
    numeric_columns: Vec<&'static str>,
}

impl TableSchema {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(label_column: Option<&'static str>, numeric_columns: Vec<&'static str>) -> Self {
        Self {
            label_column,
            numeric_columns,
        }
    }

    ///
    /// The declared header, label column first.
    ///
    fn declared_columns(&self) -> Vec<String> {
        self.label_column
            .iter()
            .chain(self.numeric_columns.iter())
            .map(|column| (*column).to_owned())
            .collect()
    }

    ///
    /// Reads and validates the file the executable is expected to have
    /// written.
    ///
    /// A missing file is `MissingArtifact`; a header differing from the
    /// declared schema is `SchemaMismatch`. Decorated numeric cells are
    /// sanitized before parsing; a cell that still does not parse (such as a
    /// bare `-`) becomes an absent metric for that row, not an error.
    ///
    pub fn read(&self, path: &Path) -> Result<Vec<TableRow>, ExtractionError> {
        let contents =
            std::fs::read_to_string(path).map_err(|error| ExtractionError::MissingArtifact {
                path: path.to_owned(),
                error,
            })?;

        let expected = self.declared_columns();
        let mut lines = contents.lines();
        let found: Vec<String> = lines
            .next()
            .unwrap_or_default()
            .split(',')
            .map(|column| column.trim().trim_matches('"').to_owned())
            .filter(|column| !column.is_empty())
            .collect();
        if found != expected {
            return Err(ExtractionError::SchemaMismatch {
                path: path.to_owned(),
                expected,
                found,
            });
        }

        let mut rows = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let mut cells = line.split(',');

            let label = match self.label_column {
                Some(_) => cells.next().map(|cell| cell.trim().to_owned()),
                None => None,
            };

            let mut record = RawRecord::default();
            for (column, cell) in self.numeric_columns.iter().zip(cells) {
                if let Some(value) = sanitize_numeric(cell) {
                    record.insert(column, value);
                }
            }
            rows.push(TableRow { label, record });
        }

        Ok(rows)
    }
}

///
/// Strips embedded units and symbols from a cell and parses what remains.
///
fn sanitize_numeric(cell: &str) -> Option<f64> {
    let cleaned = DECORATION.replace_all(cell.trim(), "");
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use crate::extract::error::ExtractionError;

    use super::sanitize_numeric;
    use super::TableSchema;

    fn write_fixture(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(path.as_path()).expect("Temp file");
        file.write_all(contents.as_bytes()).expect("Temp file");
        path
    }

    fn schema() -> TableSchema {
        TableSchema::new(
            Some("Distribution"),
            vec!["SerialTime", "SimdTime", "ThreadedTime"],
        )
    }

    #[test]
    fn reads_labeled_rows() {
        let path = write_fixture(
            "table_file_reads_labeled_rows.csv",
            "Distribution,SerialTime,SimdTime,ThreadedTime\nUNIFORM,4.0,2.0,1.0\n",
        );
        let rows = schema().read(path.as_path()).expect("Valid file");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label.as_deref(), Some("UNIFORM"));
        assert_eq!(rows[0].record.get("SerialTime"), Some(4.0));
        assert_eq!(rows[0].record.get("ThreadedTime"), Some(1.0));
    }

    #[test]
    fn missing_file_is_a_missing_artifact() {
        let error = schema()
            .read(std::path::Path::new("./no-such-results.csv"))
            .expect_err("File absent");
        assert!(matches!(error, ExtractionError::MissingArtifact { .. }));
    }

    #[test]
    fn wrong_header_is_a_schema_mismatch() {
        let path = write_fixture(
            "table_file_wrong_header.csv",
            "Kind,Serial,Simd\nUNIFORM,4.0,2.0\n",
        );
        let error = schema().read(path.as_path()).expect_err("Header differs");
        match error {
            ExtractionError::SchemaMismatch {
                expected, found, ..
            } => {
                assert_eq!(expected[0], "Distribution");
                assert_eq!(found[0], "Kind");
            }
            other => panic!("Expected a schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn decorated_and_dash_cells_degrade_gracefully() {
        let path = write_fixture(
            "table_file_decorated_cells.csv",
            "Distribution,SerialTime,SimdTime,ThreadedTime\nSPARSE,4.0s,-,1.0\n",
        );
        let rows = schema().read(path.as_path()).expect("Valid file");
        assert_eq!(rows[0].record.get("SerialTime"), Some(4.0));
        assert_eq!(rows[0].record.get("SimdTime"), None);
        assert_eq!(rows[0].record.get("ThreadedTime"), Some(1.0));
    }

    #[test]
    fn sanitizer_strips_units_and_rejects_placeholders() {
        assert_eq!(sanitize_numeric(" 12.5 GB/s "), Some(12.5));
        assert_eq!(sanitize_numeric("3.2x"), Some(3.2));
        assert_eq!(sanitize_numeric("85.3%"), Some(85.3));
        assert_eq!(sanitize_numeric("-"), None);
        assert_eq!(sanitize_numeric(""), None);
    }

    #[test]
    fn unlabeled_schema_reads_all_cells_as_numeric() {
        let schema = TableSchema::new(None, vec!["Tamanho", "SerialTime"]);
        let path = write_fixture(
            "table_file_unlabeled.csv",
            "Tamanho,SerialTime\n1000000,0.004\n",
        );
        let rows = schema.read(path.as_path()).expect("Valid file");
        assert_eq!(rows[0].label, None);
        assert_eq!(rows[0].record.get("Tamanho"), Some(1_000_000.0));
    }
}
