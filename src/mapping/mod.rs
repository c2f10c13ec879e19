//! Field mapping: assignment of WordPress target fields to source columns
//! or literal constants.
//!
//! The target-field set is a closed enumeration with a `Meta` escape hatch
//! for custom fields, so validation stays static. A mapping is built
//! interactively or loaded from the store, checked against the active
//! dataset's columns, and validated (title is required) before a run.

mod store;

pub use store::{MappingStore, StoredMapping};

use serde::{Deserialize, Serialize};

use crate::error::PressmapError;

/// A WordPress post field that a source column or constant can map to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetField {
    Title,
    Content,
    Excerpt,
    Status,
    Slug,
    /// Custom field, sent in the payload's `meta` object under this key.
    Meta(String),
}

/// The standard (non-meta) fields offered by the mapping dialog.
pub const STANDARD_FIELDS: [TargetField; 5] = [
    TargetField::Title,
    TargetField::Content,
    TargetField::Excerpt,
    TargetField::Status,
    TargetField::Slug,
];

impl TargetField {
    /// Human-readable name, also used in error messages.
    pub fn display_name(&self) -> String {
        match self {
            TargetField::Title => "title".to_string(),
            TargetField::Content => "content".to_string(),
            TargetField::Excerpt => "excerpt".to_string(),
            TargetField::Status => "status".to_string(),
            TargetField::Slug => "slug".to_string(),
            TargetField::Meta(key) => format!("meta:{}", key),
        }
    }

    /// Title is the one field WordPress cannot create a post without.
    pub fn is_required(&self) -> bool {
        matches!(self, TargetField::Title)
    }
}

/// Where a target field's value comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// Take the value from this source column (null/missing cell → empty string).
    Column(String),
    /// Use this literal string for every row.
    Constant(String),
}

/// One target-field assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAssignment {
    pub field: TargetField,
    pub source: FieldSource,
}

/// The user-chosen mapping from target fields to sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    assignments: Vec<FieldAssignment>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a source to a field, replacing any previous assignment.
    pub fn assign(&mut self, field: TargetField, source: FieldSource) {
        self.unassign(&field);
        self.assignments.push(FieldAssignment { field, source });
    }

    /// Remove a field's assignment, if present.
    pub fn unassign(&mut self, field: &TargetField) {
        self.assignments.retain(|a| &a.field != field);
    }

    pub fn source_for(&self, field: &TargetField) -> Option<&FieldSource> {
        self.assignments
            .iter()
            .find(|a| &a.field == field)
            .map(|a| &a.source)
    }

    pub fn assignments(&self) -> &[FieldAssignment] {
        &self.assignments
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Check that every referenced source column exists in the active
    /// dataset. Fails on the first mismatch; the caller re-maps and retries.
    pub fn check_columns(&self, columns: &[String]) -> Result<(), PressmapError> {
        for assignment in &self.assignments {
            if let FieldSource::Column(name) = &assignment.source {
                if !columns.contains(name) {
                    return Err(PressmapError::SchemaMismatch {
                        field: assignment.field.display_name(),
                        column: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate that every required field is mapped. Returns the mapping
    /// itself so a run can proceed directly from the validated reference.
    pub fn validate(&self) -> Result<&Self, PressmapError> {
        for field in STANDARD_FIELDS {
            if field.is_required() && self.source_for(&field).is_none() {
                return Err(PressmapError::MissingRequiredField(field.display_name()));
            }
        }
        Ok(self)
    }
}
