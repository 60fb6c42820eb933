//!
//! Serializing the results table to CSV.
//!

use std::fmt::Write;

use crate::model::point::AxisValue;
use crate::model::table::ResultsTable;

///
/// Serialize the results table to CSV: a header row of axis and metric
/// column names, then one row per record in enumeration order. Metrics a row
/// does not carry render as empty cells.
///
#[derive(Default)]
pub struct Csv {
    /// The CSV string.
    pub content: String,
}

impl Csv {
    ///
    /// Estimate the size of the CSV file based on the number of rows and an
    /// expected maximum line length.
    ///
    fn estimate_csv_size(table: &ResultsTable) -> usize {
        let cell_estimated_max_length = 24;
        let columns = table.axis_columns().len() + table.metric_columns().len();
        (table.len() + 1) * columns * cell_estimated_max_length
    }
}

impl From<&ResultsTable> for Csv {
    fn from(table: &ResultsTable) -> Csv {
        let mut content = String::with_capacity(Self::estimate_csv_size(table));

        let header: Vec<String> = table
            .axis_columns()
            .iter()
            .chain(table.metric_columns().iter())
            .map(|column| format!("\"{column}\""))
            .collect();
        content.push_str(header.join(", ").as_str());
        content.push('\n');

        for row in table.rows().iter() {
            let mut cells: Vec<String> = Vec::with_capacity(header.len());
            for column in table.axis_columns().iter() {
                cells.push(match row.point.value(column) {
                    Some(AxisValue::Integer(value)) => value.to_string(),
                    Some(AxisValue::Text(value)) => format!("\"{value}\""),
                    None => String::new(),
                });
            }
            for column in table.metric_columns().iter() {
                cells.push(
                    row.get(column)
                        .map(|value| value.to_string())
                        .unwrap_or_default(),
                );
            }
            writeln!(&mut content, "{}", cells.join(", ")).expect("Always valid");
        }

        Self { content }
    }
}
