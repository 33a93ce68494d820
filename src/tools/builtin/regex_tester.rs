//! Regex Tester

use regex::Regex;

use crate::dom::{Element, EventKind};
use crate::error::Result;
use crate::shell::ToolDescriptor;
use crate::tools::TransformError;
use crate::tools::common::require;

pub const KIND: &str = "regex";
pub const TITLE: &str = "Regex Tester";

const BODY: &str = r#"<div class="space-y-4">
  <input class="regex-input" placeholder="Enter regex pattern...">
  <textarea class="test-string-input" placeholder="Enter test string..."></textarea>
  <button class="test-btn">Test</button>
  <textarea class="result-area" placeholder="Results..." readonly></textarea>
</div>"#;

pub const NO_MATCH: &str = "No matches found";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(KIND, TITLE, BODY).with_wire(wire)
}

/// First match of `pattern` in `haystack` followed by its capture groups,
/// one per line; a group that did not participate yields an empty line
pub fn first_match(pattern: &str, haystack: &str) -> std::result::Result<String, TransformError> {
    let re = Regex::new(pattern).map_err(|e| TransformError::InvalidRegex(e.to_string()))?;
    Ok(match re.captures(haystack) {
        Some(caps) => caps
            .iter()
            .map(|group| group.map(|m| m.as_str()).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("\n"),
        None => NO_MATCH.to_string(),
    })
}

fn wire(root: &Element) -> Result<()> {
    let pattern = require(root, ".regex-input")?;
    let haystack = require(root, ".test-string-input")?;
    let result = require(root, ".result-area")?;
    require(root, ".test-btn")?.add_event_listener(EventKind::Click, move |e| {
        match first_match(&pattern.value(), &haystack.value()) {
            Ok(out) => {
                result.set_value(out);
            }
            Err(err) => e.target.alert(err.to_string()),
        }
    });
    Ok(())
}
