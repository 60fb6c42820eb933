//!
//! Results table output.
//!

pub mod csv;
pub mod file;
pub mod format;
pub mod json;

use std::path::Path;

use crate::model::table::ResultsTable;
use crate::output::csv::Csv;
use crate::output::format::OutputFormat;
use crate::output::json::Json;

use self::file::File;

///
/// A serialized results table ready to be persisted.
///
pub enum Output {
    /// The output is a single unnamed file.
    SingleFile(String),
    /// The output is structured as a file tree, relative to some
    /// user-provided output directory.
    MultipleFiles(Vec<File>),
}

impl Output {
    ///
    /// Writes the serialized table to disk, unconditionally overwriting a
    /// previous artifact of the same name.
    ///
    pub fn write_to_file(self, path: &Path) -> anyhow::Result<()> {
        match self {
            Output::SingleFile(contents) => {
                std::fs::write(path, contents)
                    .map_err(|error| anyhow::anyhow!("Results file {path:?} writing: {error}"))?;
            }
            Output::MultipleFiles(files) => {
                if !files.is_empty() {
                    std::fs::create_dir_all(path)?;
                }
                for File {
                    path: relative_path,
                    contents,
                } in files
                {
                    let file_path = path.join(relative_path);
                    std::fs::write(file_path.as_path(), contents).map_err(|error| {
                        anyhow::anyhow!("Results file {file_path:?} writing: {error}")
                    })?;
                }
            }
        }
        Ok(())
    }
}

impl From<(&ResultsTable, &OutputFormat)> for Output {
    fn from((table, output_format): (&ResultsTable, &OutputFormat)) -> Self {
        match output_format {
            OutputFormat::Csv => Csv::from(table).into(),
            OutputFormat::Json => Json::from(table).into(),
        }
    }
}

impl From<Csv> for Output {
    fn from(value: Csv) -> Self {
        Output::SingleFile(value.content)
    }
}

impl From<Json> for Output {
    fn from(value: Json) -> Self {
        Output::SingleFile(value.content)
    }
}
