//! JSON Formatter

use serde_json::Value;

use crate::dom::Element;
use crate::error::Result;
use crate::shell::ToolDescriptor;
use crate::tools::TransformError;
use crate::tools::common::{on_click_transform, require, wire_copy_button};

pub const KIND: &str = "json";
pub const TITLE: &str = "JSON Formatter";

const BODY: &str = r#"<div class="space-y-4">
  <textarea class="json-text" placeholder="Paste your JSON here..."></textarea>
  <div class="flex gap-2">
    <button class="format-btn">Format</button>
    <button class="copy-btn">Copy</button>
  </div>
</div>"#;

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(KIND, TITLE, BODY).with_wire(wire)
}

/// Pretty-print `input` with two-space indentation, keeping key order
pub fn format_json(input: &str) -> std::result::Result<String, TransformError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TransformError::EmptyInput("Please enter some JSON"));
    }
    let value: Value = serde_json::from_str(input).map_err(|e| TransformError::InvalidJson(e.to_string()))?;
    serde_json::to_string_pretty(&value).map_err(|e| TransformError::InvalidJson(e.to_string()))
}

fn wire(root: &Element) -> Result<()> {
    let text = require(root, "textarea")?;
    on_click_transform(&require(root, ".format-btn")?, &text, &text, format_json);
    wire_copy_button(&require(root, ".copy-btn")?, &text);
    Ok(())
}
