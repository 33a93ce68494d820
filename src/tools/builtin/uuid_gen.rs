//! UUID Generator

use uuid::Uuid;

use crate::dom::{Element, EventKind};
use crate::error::Result;
use crate::shell::ToolDescriptor;
use crate::tools::TransformError;
use crate::tools::common::require;

pub const KIND: &str = "uuid";
pub const TITLE: &str = "UUID Generator";

pub const COPIED_NOTICE: &str = "UUID copied to clipboard";

const BODY: &str = r#"<div class="space-y-4">
  <button class="generate-btn">Generate UUID</button>
  <textarea class="result-area" placeholder="UUID will appear here..." readonly></textarea>
  <button class="copy-btn">Copy</button>
</div>"#;

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(KIND, TITLE, BODY).with_wire(wire)
}

/// Random (version 4) UUID in hyphenated lowercase form
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}

fn wire(root: &Element) -> Result<()> {
    let result = require(root, ".result-area")?;

    let target = result.clone();
    require(root, ".generate-btn")?.add_event_listener(EventKind::Click, move |_| {
        target.set_value(generate());
    });

    require(root, ".copy-btn")?.add_event_listener(EventKind::Click, move |e| {
        if e.target.write_clipboard(&result.value()) {
            e.target.alert(COPIED_NOTICE);
        } else {
            e.target.alert(TransformError::Clipboard("document unavailable".to_string()).to_string());
        }
    });
    Ok(())
}
