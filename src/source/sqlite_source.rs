//! SQLite reader: read-only access to a single named table.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};

use crate::error::PressmapError;
use crate::source::{Dataset, Row, Value};

/// Read all rows of `table` from a SQLite file, in storage order.
///
/// The connection is opened read-only; the source file is never written.
/// A missing or non-SQLite file fails as a source-open error, an absent
/// table as a schema error.
pub fn read_sqlite(path: &Path, table: &str) -> Result<Dataset, PressmapError> {
    if !path.is_file() {
        return Err(PressmapError::source_open(path, "no such file"));
    }

    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|e| PressmapError::source_open(path, e.to_string()))?;

    // Opening succeeds for any file; the first statement is what reports
    // "file is not a database" for non-SQLite content.
    let table_exists: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
            [table],
            |row| row.get::<_, i64>(0),
        )
        .map(|n| n > 0)
        .map_err(|e| PressmapError::source_open(path, e.to_string()))?;

    if !table_exists {
        return Err(PressmapError::schema(
            path,
            format!("table '{}' does not exist", table),
        ));
    }

    let mut stmt = conn
        .prepare(&format!("SELECT * FROM \"{}\"", table.replace('"', "\"\"")))
        .map_err(|e| PressmapError::schema(path, e.to_string()))?;

    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    if columns.is_empty() {
        return Err(PressmapError::schema(
            path,
            format!("table '{}' has no columns", table),
        ));
    }

    let mut rows = Vec::new();
    let mut result_rows = stmt
        .query([])
        .map_err(|e| PressmapError::schema(path, e.to_string()))?;
    let mut line: u64 = 0;
    while let Some(row) = result_rows.next().map_err(|e| PressmapError::RowParse {
        path: path.to_path_buf(),
        line,
        reason: e.to_string(),
    })? {
        line += 1;
        let mut cells = Vec::with_capacity(columns.len());
        for i in 0..columns.len() {
            let cell = row.get_ref(i).map_err(|e| PressmapError::RowParse {
                path: path.to_path_buf(),
                line,
                reason: e.to_string(),
            })?;
            cells.push(convert_value(cell));
        }
        rows.push(Row::new(cells));
    }

    Ok(Dataset::new(columns, rows))
}

fn convert_value(cell: ValueRef<'_>) -> Value {
    match cell {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::Integer(n),
        ValueRef::Real(x) => Value::Real(x),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
    }
}
