//! JSON to CSV Converter

use serde_json::Value;

use crate::dom::Element;
use crate::error::Result;
use crate::shell::ToolDescriptor;
use crate::tools::TransformError;
use crate::tools::common::{on_click_transform, require};

pub const KIND: &str = "jsonToCsv";
pub const TITLE: &str = "JSON to CSV Converter";

const BODY: &str = r#"<div class="space-y-4">
  <textarea class="json-input" placeholder="Enter JSON array here..."></textarea>
  <button class="convert-btn">Convert to CSV</button>
  <textarea class="result-area" placeholder="CSV will appear here..." readonly></textarea>
</div>"#;

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(KIND, TITLE, BODY).with_wire(wire)
}

/// Convert a JSON array of objects to CSV
///
/// The header is the first object's keys. Each cell is the JSON encoding of
/// the row's value with every `null` turned into an empty string; a key the
/// row lacks gives an empty cell.
pub fn json_to_csv(input: &str) -> std::result::Result<String, TransformError> {
    let value: Value = serde_json::from_str(input).map_err(|_| TransformError::InvalidTable)?;
    let rows = value.as_array().ok_or(TransformError::InvalidTable)?;
    let keys: Vec<&String> = rows
        .first()
        .and_then(Value::as_object)
        .ok_or(TransformError::InvalidTable)?
        .keys()
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(keys.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(","));
    for row in rows {
        let cells: Vec<String> = keys
            .iter()
            .map(|key| match row.get(key.as_str()) {
                Some(v) => serde_json::to_string(&blank_nulls(v.clone())).unwrap_or_default(),
                None => String::new(),
            })
            .collect();
        lines.push(cells.join(","));
    }
    Ok(lines.join("\n"))
}

fn blank_nulls(value: Value) -> Value {
    match value {
        Value::Null => Value::String(String::new()),
        Value::Array(items) => Value::Array(items.into_iter().map(blank_nulls).collect()),
        Value::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (k, blank_nulls(v))).collect()),
        other => other,
    }
}

fn wire(root: &Element) -> Result<()> {
    on_click_transform(
        &require(root, ".convert-btn")?,
        &require(root, ".json-input")?,
        &require(root, ".result-area")?,
        json_to_csv,
    );
    Ok(())
}
