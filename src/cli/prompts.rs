//! Interactive prompts using dialoguer
//!
//! The mapping dialog walks the standard WordPress fields in order and
//! offers, for each one: skip, a literal constant, or one of the source
//! columns. Custom meta fields are added in a follow-up loop.

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};

use crate::mapping::{FieldMapping, FieldSource, TargetField, STANDARD_FIELDS};

const CHOICE_SKIP: &str = "(leave unmapped)";
const CHOICE_CONSTANT: &str = "(constant value…)";

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Prompt user to confirm sending the batch
pub fn confirm_run(row_count: usize, site: &str) -> Result<bool> {
    confirm_step(&format!("Send {} row(s) to {}?", row_count, site))
}

/// Build a field mapping interactively from the discovered columns.
///
/// `existing` pre-selects the current sources, so re-mapping after a schema
/// mismatch only needs changes where the columns moved.
pub fn build_mapping(columns: &[String], existing: Option<&FieldMapping>) -> Result<FieldMapping> {
    let mut mapping = existing.cloned().unwrap_or_default();

    for field in STANDARD_FIELDS {
        let current = mapping.source_for(&field).cloned();
        if let Some(source) = choose_source(&field, columns, current.as_ref())? {
            mapping.assign(field, source);
        } else {
            mapping.unassign(&field);
        }
    }

    while Confirm::new()
        .with_prompt("Add a custom meta field?")
        .default(false)
        .interact()?
    {
        let key: String = Input::new()
            .with_prompt("Meta key")
            .validate_with(|s: &String| -> Result<(), &str> {
                if s.trim().is_empty() {
                    Err("meta key cannot be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        let field = TargetField::Meta(key.trim().to_string());
        if let Some(source) = choose_source(&field, columns, None)? {
            mapping.assign(field, source);
        }
    }

    Ok(mapping)
}

/// Offer skip / constant / each source column for one target field.
fn choose_source(
    field: &TargetField,
    columns: &[String],
    current: Option<&FieldSource>,
) -> Result<Option<FieldSource>> {
    let mut items: Vec<String> = vec![CHOICE_SKIP.to_string(), CHOICE_CONSTANT.to_string()];
    items.extend(columns.iter().cloned());

    let default = match current {
        Some(FieldSource::Constant(_)) => 1,
        Some(FieldSource::Column(name)) => columns
            .iter()
            .position(|c| c == name)
            .map_or(0, |i| i + 2),
        None => 0,
    };

    let prompt = if field.is_required() {
        format!("Map '{}' (required) to", field.display_name())
    } else {
        format!("Map '{}' to", field.display_name())
    };

    let choice = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default)
        .interact()?;

    match choice {
        0 => Ok(None),
        1 => {
            let initial = match current {
                Some(FieldSource::Constant(text)) => text.clone(),
                _ => String::new(),
            };
            let text: String = Input::new()
                .with_prompt(format!("Constant value for '{}'", field.display_name()))
                .with_initial_text(initial)
                .allow_empty(true)
                .interact_text()?;
            Ok(Some(FieldSource::Constant(text)))
        }
        n => Ok(Some(FieldSource::Column(items[n].clone()))),
    }
}
