//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;

use pressmap::mapping::{FieldMapping, FieldSource, TargetField};
use tempfile::TempDir;

/// Write a CSV file with the given content into `dir` and return its path.
pub fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{}", content).unwrap();
    path
}

/// Create a small SQLite database with an `articles` table of three rows.
pub fn create_articles_db(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("articles.db");
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE articles (headline TEXT, body TEXT, views INTEGER);
         INSERT INTO articles VALUES ('First', 'first body', 12);
         INSERT INTO articles VALUES ('Second', NULL, 0);
         INSERT INTO articles VALUES ('Third', 'third body', 7);",
    )
    .unwrap();
    path
}

/// Mapping used across the batch tests: title←title, content←body.
pub fn title_body_mapping() -> FieldMapping {
    let mut mapping = FieldMapping::new();
    mapping.assign(
        TargetField::Title,
        FieldSource::Column("title".to_string()),
    );
    mapping.assign(
        TargetField::Content,
        FieldSource::Column("body".to_string()),
    );
    mapping
}
