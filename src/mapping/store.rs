//! File-system store for named field mappings.
//!
//! One JSON file per mapping, `{name}.json`, under the store directory
//! (defaults to the user config directory). Saving overwrites silently;
//! loading an absent name fails with the mapping-not-found error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::PressmapError;
use crate::mapping::FieldMapping;

/// A mapping as persisted on disk, with save metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMapping {
    pub name: String,
    /// ISO 8601 timestamp of the last save.
    pub saved_at: String,
    pub mapping: FieldMapping,
}

/// Directory-backed collection of named mappings.
#[derive(Debug, Clone)]
pub struct MappingStore {
    base_dir: PathBuf,
}

impl MappingStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Default store location under the user's config directory.
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pressmap")
            .join("mappings")
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Persist a mapping under `name`, overwriting silently if it exists.
    pub fn save(&self, name: &str, mapping: &FieldMapping) -> Result<PathBuf> {
        validate_name(name)?;
        fs::create_dir_all(&self.base_dir).with_context(|| {
            format!(
                "failed to create mapping store directory: {}",
                self.base_dir.display()
            )
        })?;

        let stored = StoredMapping {
            name: name.to_string(),
            saved_at: Utc::now().to_rfc3339(),
            mapping: mapping.clone(),
        };
        let path = self.mapping_path(name);
        let json = serde_json::to_string_pretty(&stored)?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write mapping file: {}", path.display()))?;
        Ok(path)
    }

    /// Load the mapping saved under `name`.
    pub fn load(&self, name: &str) -> Result<StoredMapping> {
        validate_name(name)?;
        let path = self.mapping_path(name);
        if !path.is_file() {
            return Err(PressmapError::MappingNotFound(name.to_string()).into());
        }
        let json = fs::read_to_string(&path)
            .with_context(|| format!("failed to read mapping file: {}", path.display()))?;
        let stored: StoredMapping = serde_json::from_str(&json)
            .with_context(|| format!("malformed mapping file: {}", path.display()))?;
        Ok(stored)
    }

    /// List saved mapping names, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let entries = match fs::read_dir(&self.base_dir) {
            Ok(entries) => entries,
            // An uncreated store is just empty.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to read mapping store: {}", self.base_dir.display())
                })
            }
        };
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Delete the mapping saved under `name`.
    pub fn delete(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        let path = self.mapping_path(name);
        if !path.is_file() {
            return Err(PressmapError::MappingNotFound(name.to_string()).into());
        }
        fs::remove_file(&path)
            .with_context(|| format!("failed to delete mapping file: {}", path.display()))?;
        Ok(())
    }

    fn mapping_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", name))
    }
}

/// Mapping names become file names, so keep them to a safe character set.
fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(PressmapError::Config(format!(
            "invalid mapping name '{}': use letters, digits, '-' and '_'",
            name
        ))
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{FieldSource, TargetField};
    use tempfile::TempDir;

    fn sample_mapping() -> FieldMapping {
        let mut mapping = FieldMapping::new();
        mapping.assign(
            TargetField::Title,
            FieldSource::Column("headline".to_string()),
        );
        mapping.assign(
            TargetField::Status,
            FieldSource::Constant("draft".to_string()),
        );
        mapping
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = MappingStore::new(dir.path());
        let mapping = sample_mapping();

        store.save("blog-import", &mapping).unwrap();
        let stored = store.load("blog-import").unwrap();

        assert_eq!(stored.name, "blog-import");
        assert_eq!(stored.mapping, mapping);
        assert!(!stored.saved_at.is_empty());
    }

    #[test]
    fn test_save_overwrites_silently() {
        let dir = TempDir::new().unwrap();
        let store = MappingStore::new(dir.path());

        store.save("x", &sample_mapping()).unwrap();
        let mut updated = sample_mapping();
        updated.assign(
            TargetField::Content,
            FieldSource::Column("body".to_string()),
        );
        store.save("x", &updated).unwrap();

        assert_eq!(store.load("x").unwrap().mapping, updated);
        assert_eq!(store.list().unwrap(), vec!["x".to_string()]);
    }

    #[test]
    fn test_load_missing_is_mapping_not_found() {
        let dir = TempDir::new().unwrap();
        let store = MappingStore::new(dir.path());

        let err = store.load("absent").unwrap_err();
        let err = err.downcast_ref::<PressmapError>().expect("typed error");
        assert!(matches!(err, PressmapError::MappingNotFound(ref n) if n == "absent"));
    }

    #[test]
    fn test_list_and_delete() {
        let dir = TempDir::new().unwrap();
        let store = MappingStore::new(dir.path());

        store.save("b", &sample_mapping()).unwrap();
        store.save("a", &sample_mapping()).unwrap();
        assert_eq!(store.list().unwrap(), vec!["a".to_string(), "b".to_string()]);

        store.delete("a").unwrap();
        assert_eq!(store.list().unwrap(), vec!["b".to_string()]);

        let err = store.delete("a").unwrap_err();
        assert!(err.downcast_ref::<PressmapError>().is_some());
    }

    #[test]
    fn test_list_on_uncreated_store_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = MappingStore::new(dir.path().join("never-created"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_name_rejected() {
        let dir = TempDir::new().unwrap();
        let store = MappingStore::new(dir.path());

        assert!(store.save("../escape", &sample_mapping()).is_err());
        assert!(store.save("", &sample_mapping()).is_err());
    }
}
