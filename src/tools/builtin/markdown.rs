//! Markdown Previewer

use pulldown_cmark::{Options, Parser, html};

use crate::dom::{Element, EventKind};
use crate::error::Result;
use crate::shell::ToolDescriptor;
use crate::tools::common::require;

pub const KIND: &str = "markdown";
pub const TITLE: &str = "Markdown Previewer";

const BODY: &str = r#"<div class="flex flex-col h-full gap-4">
  <textarea class="markdown-input" placeholder="Enter Markdown text..."># Markdown Preview Example

This is a **bold text** example.

## Lists
- Item 1
- Item 2
  - Nested item

## Links
[OpenAI](https://openai.com)

## Code
```javascript
console.log('Hello World');
```</textarea>
  <div class="preview-area"></div>
</div>"#;

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(KIND, TITLE, BODY).with_wire(wire)
}

/// Render CommonMark (plus tables, strikethrough and task lists) to HTML
pub fn render(source: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(source, options));
    out
}

fn wire(root: &Element) -> Result<()> {
    let input = require(root, ".markdown-input")?;
    let preview = require(root, ".preview-area")?;

    preview.set_inner_html(&render(&input.value()));
    input.add_event_listener(EventKind::Input, move |e| {
        preview.set_inner_html(&render(&e.target.value()));
    });
    Ok(())
}
