//! Template Descriptor Parser
//!
//! Parses `template.json` documents into [`TemplateDescriptor`]s.
//! Missing or unknown sections default to empty sequences; page order
//! follows the JSON object's insertion order.

use serde_json::Value;

use crate::types::{ChoiceOption, PageEntry, TemplateDescriptor};

/// Parse a raw `template.json` document.
///
/// Only malformed JSON is an error; a well-formed document with missing
/// sections yields a descriptor with empty sequences.
pub fn parse_descriptor(raw: &str) -> Result<TemplateDescriptor, serde_json::Error> {
    let doc: Value = serde_json::from_str(raw)?;
    Ok(descriptor_from_value(&doc))
}

fn descriptor_from_value(doc: &Value) -> TemplateDescriptor {
    let pages = match doc["pages"].as_object() {
        Some(map) => map
            .iter()
            .map(|(id, page)| PageEntry {
                id: id.clone(),
                name: page["name"].as_str().unwrap_or(id).to_string(),
                default: page["default"].as_bool().unwrap_or(false),
            })
            .collect(),
        None => Vec::new(),
    };

    TemplateDescriptor {
        pages,
        themes: parse_options(&doc["themes"]),
        features: parse_options(&doc["features"]),
    }
}

/// Theme and feature lists accept both bare strings and `{id, name}` objects.
fn parse_options(value: &Value) -> Vec<ChoiceOption> {
    let items = match value.as_array() {
        Some(items) => items,
        None => return Vec::new(),
    };

    items.iter().filter_map(option_from_value).collect()
}

fn option_from_value(item: &Value) -> Option<ChoiceOption> {
    match item {
        Value::String(s) => Some(ChoiceOption {
            id: s.clone(),
            label: s.clone(),
        }),
        Value::Object(_) => {
            let id = item["id"].as_str().or_else(|| item["name"].as_str())?;
            let label = item["name"]
                .as_str()
                .or_else(|| item["label"].as_str())
                .unwrap_or(id);
            Some(ChoiceOption {
                id: id.to_string(),
                label: label.to_string(),
            })
        }
        _ => None,
    }
}
