//! URL Encoder/Decoder

use crate::dom::Element;
use crate::error::Result;
use crate::shell::ToolDescriptor;
use crate::tools::TransformError;
use crate::tools::common::{on_click_transform, require, wire_copy_button};

pub const KIND: &str = "url";
pub const TITLE: &str = "URL Encoder/Decoder";

const BODY: &str = r#"<div class="space-y-4">
  <textarea class="codec-text" placeholder="Enter URL to encode/decode..."></textarea>
  <div class="flex gap-2">
    <button class="encode-btn">Encode</button>
    <button class="decode-btn">Decode</button>
    <button class="copy-btn">Copy</button>
  </div>
</div>"#;

/// Marks `encodeURIComponent` leaves alone on top of `A-Z a-z 0-9 - _ . ~`
const UNESCAPED_MARKS: [(&str, &str); 5] = [("%21", "!"), ("%27", "'"), ("%28", "("), ("%29", ")"), ("%2A", "*")];

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(KIND, TITLE, BODY).with_wire(wire)
}

/// Percent-encode as a URI component
pub fn encode(input: &str) -> std::result::Result<String, TransformError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TransformError::EmptyInput("Please enter some text"));
    }
    let mut encoded = urlencoding::encode(input).into_owned();
    for (escaped, mark) in UNESCAPED_MARKS {
        encoded = encoded.replace(escaped, mark);
    }
    Ok(encoded)
}

pub fn decode(input: &str) -> std::result::Result<String, TransformError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TransformError::EmptyInput("Please enter some encoded URL"));
    }
    urlencoding::decode(input)
        .map(|s| s.into_owned())
        .map_err(|e| TransformError::Decoding(e.to_string()))
}

fn wire(root: &Element) -> Result<()> {
    let text = require(root, "textarea")?;
    on_click_transform(&require(root, ".encode-btn")?, &text, &text, encode);
    on_click_transform(&require(root, ".decode-btn")?, &text, &text, decode);
    wire_copy_button(&require(root, ".copy-btn")?, &text);
    Ok(())
}
