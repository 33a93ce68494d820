//! Base64 Encoder/Decoder

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::dom::Element;
use crate::error::Result;
use crate::shell::ToolDescriptor;
use crate::tools::TransformError;
use crate::tools::common::{on_click_transform, require, wire_copy_button};

pub const KIND: &str = "base64";
pub const TITLE: &str = "Base64 Encoder/Decoder";

const BODY: &str = r#"<div class="space-y-4">
  <textarea class="codec-text" placeholder="Enter text to encode/decode..."></textarea>
  <div class="flex gap-2">
    <button class="encode-btn">Encode</button>
    <button class="decode-btn">Decode</button>
    <button class="copy-btn">Copy</button>
  </div>
</div>"#;

/// Standard alphabet, padded on encode, padding optional on decode
const CODEC: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(KIND, TITLE, BODY).with_wire(wire)
}

pub fn encode(input: &str) -> std::result::Result<String, TransformError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TransformError::EmptyInput("Please enter some text"));
    }
    Ok(CODEC.encode(input.as_bytes()))
}

/// Decode to UTF-8 text; whitespace inside the input is ignored
pub fn decode(input: &str) -> std::result::Result<String, TransformError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TransformError::EmptyInput("Please enter some base64"));
    }
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = CODEC
        .decode(compact.as_bytes())
        .map_err(|e| TransformError::Decoding(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TransformError::Decoding(e.to_string()))
}

fn wire(root: &Element) -> Result<()> {
    let text = require(root, "textarea")?;
    on_click_transform(&require(root, ".encode-btn")?, &text, &text, encode);
    on_click_transform(&require(root, ".decode-btn")?, &text, &text, decode);
    wire_copy_button(&require(root, ".copy-btn")?, &text);
    Ok(())
}
