//! Error types for source loading, mapping, and batch submission.
//!
//! Configuration, schema, and mapping errors abort an operation before any
//! row is processed. Per-row submission errors are captured into the run
//! result by the batch loop and never abort the run.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by pressmap operations.
#[derive(Debug, Error)]
pub enum PressmapError {
    /// The source file could not be opened or is not readable as the
    /// declared kind (missing file, not a SQLite database, invalid UTF-8).
    #[error("cannot open source '{}': {reason}", path.display())]
    SourceOpen { path: PathBuf, reason: String },

    /// The source schema is unusable (empty or duplicate header names,
    /// missing table, zero-column table).
    #[error("invalid schema in '{}': {reason}", path.display())]
    Schema { path: PathBuf, reason: String },

    /// A data line does not match the header (wrong cell count, bad record).
    #[error("row parse error in '{}' at line {line}: {reason}", path.display())]
    RowParse {
        path: PathBuf,
        /// 1-based line number in the source file.
        line: u64,
        reason: String,
    },

    /// No saved mapping exists under the requested name.
    #[error("no saved mapping named '{0}'")]
    MappingNotFound(String),

    /// A loaded mapping references a column absent from the active dataset.
    #[error("mapping assigns field '{field}' to column '{column}', which does not exist in the data source")]
    SchemaMismatch { field: String, column: String },

    /// A required WordPress field has no assignment.
    #[error("required field '{0}' is not mapped")]
    MissingRequiredField(String),

    /// One row's submission to WordPress failed.
    #[error("row {row}: {detail}")]
    PostSubmit {
        /// 1-based row number within the dataset.
        row: usize,
        /// HTTP status code, when the server responded at all.
        status: Option<u16>,
        detail: String,
    },

    /// Missing or invalid connection configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PressmapError {
    pub(crate) fn source_open(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::SourceOpen {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn schema(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
