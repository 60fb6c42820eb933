//!
//! Result extraction errors.
//!

use std::path::PathBuf;

///
/// A result extraction failure. Non-fatal to the run: the offending
/// configuration point is logged and skipped.
///
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// A required labeled value was never seen, or its token was malformed.
    #[error("required field `{0}` was not found in the output")]
    MissingField(String),
    /// An expected side-effect file was not written by the executable.
    #[error("expected artifact {path:?} is missing: {error}")]
    MissingArtifact {
        /// The path to the expected file.
        path: PathBuf,
        /// The underlying IO error.
        error: std::io::Error,
    },
    /// The side-effect file's header does not match the declared schema.
    #[error("artifact {path:?} schema mismatch: expected columns {expected:?}, found {found:?}")]
    SchemaMismatch {
        /// The path to the file.
        path: PathBuf,
        /// The declared column names.
        expected: Vec<String>,
        /// The column names actually found.
        found: Vec<String>,
    },
}
