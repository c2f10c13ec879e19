//! CSV reader: header-driven, strict about schema and row shape.

use std::path::Path;

use crate::error::PressmapError;
use crate::source::{Dataset, Row, Value};

/// Read a CSV file into a dataset. The first line defines the column names;
/// every subsequent line becomes one row, in file order.
///
/// Header names must be non-empty and unique. A data line whose cell count
/// differs from the header fails with a row parse error naming the 1-based
/// line number. Malformed UTF-8 fails as a source-open error.
pub fn read_csv(path: &Path) -> Result<Dataset, PressmapError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| PressmapError::source_open(path, e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| map_record_error(path, e))?
        .clone();
    let columns: Vec<String> = headers.iter().map(str::to_string).collect();
    validate_header(path, &columns)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| map_record_error(path, e))?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != columns.len() {
            return Err(PressmapError::RowParse {
                path: path.to_path_buf(),
                line,
                reason: format!(
                    "expected {} cells to match the header, found {}",
                    columns.len(),
                    record.len()
                ),
            });
        }

        let cells = record
            .iter()
            .map(|cell| {
                if cell.is_empty() {
                    Value::Null
                } else {
                    Value::Text(cell.to_string())
                }
            })
            .collect();
        rows.push(Row::new(cells));
    }

    Ok(Dataset::new(columns, rows))
}

fn validate_header(path: &Path, columns: &[String]) -> Result<(), PressmapError> {
    if columns.is_empty() || columns.iter().all(String::is_empty) {
        return Err(PressmapError::schema(path, "header row is empty"));
    }
    for (i, name) in columns.iter().enumerate() {
        if name.is_empty() {
            return Err(PressmapError::schema(
                path,
                format!("header column {} has an empty name", i + 1),
            ));
        }
        if columns[..i].contains(name) {
            return Err(PressmapError::schema(
                path,
                format!("duplicate header column '{}'", name),
            ));
        }
    }
    Ok(())
}

/// Encoding problems mean the file itself is unreadable; anything else is a
/// per-record problem reported with its line number.
fn map_record_error(path: &Path, err: csv::Error) -> PressmapError {
    let line = err.position().map_or(0, csv::Position::line);
    match err.kind() {
        csv::ErrorKind::Utf8 { .. } => {
            PressmapError::source_open(path, "file is not valid UTF-8")
        }
        csv::ErrorKind::Io(_) => PressmapError::source_open(path, err.to_string()),
        _ => PressmapError::RowParse {
            path: path.to_path_buf(),
            line,
            reason: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    #[test]
    fn test_rows_in_file_order() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "ok.csv", "title,body\nHello,World\nFoo,Bar\n");

        let ds = read_csv(&path).unwrap();
        assert_eq!(ds.columns(), &["title", "body"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.value(0, "title"), Some(&Value::Text("Hello".into())));
        assert_eq!(ds.value(1, "body"), Some(&Value::Text("Bar".into())));
    }

    #[test]
    fn test_duplicate_header_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "dup.csv", "title,title\na,b\n");

        let err = read_csv(&path).unwrap_err();
        assert!(matches!(err, PressmapError::Schema { .. }), "{err}");
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_empty_header_name_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "empty.csv", "title,,body\na,b,c\n");

        let err = read_csv(&path).unwrap_err();
        assert!(matches!(err, PressmapError::Schema { .. }), "{err}");
    }

    #[test]
    fn test_short_row_names_line_number() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "short.csv", "a,b,c\n1,2,3\n4,5\n");

        let err = read_csv(&path).unwrap_err();
        match err {
            PressmapError::RowParse { line, .. } => assert_eq!(line, 3),
            other => panic!("expected RowParse, got {other}"),
        }
    }

    #[test]
    fn test_empty_cell_is_null() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "null.csv", "a,b\n1,\n");

        let ds = read_csv(&path).unwrap();
        assert_eq!(ds.value(0, "b"), Some(&Value::Null));
    }

    #[test]
    fn test_missing_file_is_source_open() {
        let err = read_csv(Path::new("/nonexistent/posts.csv")).unwrap_err();
        assert!(matches!(err, PressmapError::SourceOpen { .. }), "{err}");
    }

    #[test]
    fn test_invalid_utf8_is_source_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.csv");
        std::fs::write(&path, b"title,body\ncaf\xe9,x\n").unwrap();

        let err = read_csv(&path).unwrap_err();
        assert!(matches!(err, PressmapError::SourceOpen { .. }), "{err}");
        assert!(err.to_string().contains("UTF-8"));
    }
}
