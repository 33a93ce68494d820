//! JWT Decoder
//!
//! Shows the payload of a token. Signatures are not verified.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::Value;

use crate::dom::Element;
use crate::error::Result;
use crate::shell::ToolDescriptor;
use crate::tools::TransformError;
use crate::tools::common::{on_click_transform, require};

pub const KIND: &str = "jwt";
pub const TITLE: &str = "JWT Decoder";

const BODY: &str = r#"<div class="space-y-4">
  <textarea class="jwt-input" placeholder="Enter JWT here..."></textarea>
  <button class="decode-btn">Decode</button>
  <textarea class="result-area" placeholder="Decoded payload will appear here..." readonly></textarea>
</div>"#;

const SEGMENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(KIND, TITLE, BODY).with_wire(wire)
}

/// Pretty-printed JSON payload of `token`
///
/// Standard-alphabet segments are accepted as well as base64url.
pub fn decode_payload(token: &str) -> std::result::Result<String, TransformError> {
    let payload = token.trim().split('.').nth(1).ok_or(TransformError::InvalidJwt)?;
    let normalized = payload.replace('+', "-").replace('/', "_");
    let bytes = SEGMENT.decode(normalized.as_bytes()).map_err(|_| TransformError::InvalidJwt)?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|_| TransformError::InvalidJwt)?;
    serde_json::to_string_pretty(&value).map_err(|_| TransformError::InvalidJwt)
}

fn wire(root: &Element) -> Result<()> {
    on_click_transform(
        &require(root, ".decode-btn")?,
        &require(root, ".jwt-input")?,
        &require(root, ".result-area")?,
        decode_payload,
    );
    Ok(())
}
