//! Data source readers for CSV files and SQLite tables.
//!
//! Both readers produce the same row-oriented [`Dataset`]: an ordered
//! column-name list plus one [`Row`] per record, in source order. Datasets
//! are read-only once loaded; the source file is never written.

mod csv_source;
mod sqlite_source;

use std::path::Path;

pub use csv_source::read_csv;
pub use sqlite_source::read_sqlite;

use crate::error::PressmapError;

/// A single cell value from either source kind.
///
/// CSV cells load as [`Value::Text`] (empty cell becomes [`Value::Null`]);
/// SQLite cells keep their storage class.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// Render the cell for a post payload. Null becomes the empty string.
    pub fn to_field_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Integer(n) => n.to_string(),
            Value::Real(x) => x.to_string(),
            Value::Text(s) => s.clone(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// One record from the source, with cells aligned to the dataset's columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<Value>,
}

impl Row {
    pub fn new(cells: Vec<Value>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Value] {
        &self.cells
    }
}

/// Declared kind of a data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Csv,
    /// SQLite file with the table to read.
    Sqlite { table: String },
}

impl SourceKind {
    /// Infer the source kind from a file extension. SQLite extensions
    /// require a table name; anything else is treated as CSV.
    pub fn infer(path: &Path, table: Option<&str>) -> Result<Self, PressmapError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "db" | "sqlite" | "sqlite3" => {
                let table = table.ok_or_else(|| {
                    PressmapError::Config(
                        "SQLite sources need a table name (--table)".to_string(),
                    )
                })?;
                Ok(SourceKind::Sqlite {
                    table: table.to_string(),
                })
            }
            _ => Ok(SourceKind::Csv),
        }
    }
}

/// A loaded data source: ordered columns and rows in source order.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Look up a cell by row index and column name. `None` when the column
    /// does not exist.
    pub fn value(&self, row_index: usize, column: &str) -> Option<&Value> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row_index).and_then(|r| r.cells.get(col))
    }
}

/// Load a dataset from a file according to its declared kind.
pub fn load_dataset(path: &Path, kind: &SourceKind) -> Result<Dataset, PressmapError> {
    match kind {
        SourceKind::Csv => read_csv(path),
        SourceKind::Sqlite { table } => read_sqlite(path, table),
    }
}
