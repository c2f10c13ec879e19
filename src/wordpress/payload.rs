//! Post payload construction: one row plus the current mapping, resolved
//! deterministically into the JSON body for the post-creation endpoint.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::mapping::{FieldMapping, FieldSource, TargetField};
use crate::source::Dataset;

/// The per-row body sent to WordPress. Unmapped optional fields are omitted
/// from the JSON entirely so WordPress applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

/// Build the payload for one row. Column sources take the row's cell value
/// (null or missing cell becomes the empty string); constant sources are
/// used verbatim.
pub fn build_payload(dataset: &Dataset, row_index: usize, mapping: &FieldMapping) -> PostPayload {
    let resolve = |source: &FieldSource| -> String {
        match source {
            FieldSource::Column(name) => dataset
                .value(row_index, name)
                .map(|v| v.to_field_string())
                .unwrap_or_default(),
            FieldSource::Constant(text) => text.clone(),
        }
    };

    let mut payload = PostPayload::default();
    for assignment in mapping.assignments() {
        let value = resolve(&assignment.source);
        match &assignment.field {
            TargetField::Title => payload.title = value,
            TargetField::Content => payload.content = Some(value),
            TargetField::Excerpt => payload.excerpt = Some(value),
            TargetField::Status => payload.status = Some(value),
            TargetField::Slug => payload.slug = Some(value),
            TargetField::Meta(key) => {
                payload.meta.insert(key.clone(), value);
            }
        }
    }
    payload
}
