//! Hash Generator

use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::dom::{Element, EventKind};
use crate::error::Result;
use crate::shell::ToolDescriptor;
use crate::tools::TransformError;
use crate::tools::common::require;

pub const KIND: &str = "hash";
pub const TITLE: &str = "Hash Generator";

const BODY: &str = r#"<div class="space-y-4">
  <select class="algorithm-select">
    <option value="SHA-1">SHA-1</option>
    <option value="SHA-256">SHA-256</option>
    <option value="SHA-384">SHA-384</option>
    <option value="SHA-512">SHA-512</option>
  </select>
  <textarea class="input-text" placeholder="Enter text to hash..."></textarea>
  <button class="generate-btn">Generate</button>
  <textarea class="result-area" placeholder="Hash result..." readonly></textarea>
</div>"#;

/// Supported digests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm {
    /// Parse from the select's option value (e.g., "SHA-256")
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "SHA-1" => Some(Self::Sha1),
            "SHA-256" => Some(Self::Sha256),
            "SHA-384" => Some(Self::Sha384),
            "SHA-512" => Some(Self::Sha512),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }

    /// Lowercase hex digest of `data`
    pub fn digest_hex(&self, data: &[u8]) -> String {
        match self {
            Self::Sha1 => hex::encode(Sha1::digest(data)),
            Self::Sha256 => hex::encode(Sha256::digest(data)),
            Self::Sha384 => hex::encode(Sha384::digest(data)),
            Self::Sha512 => hex::encode(Sha512::digest(data)),
        }
    }
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(KIND, TITLE, BODY).with_wire(wire)
}

/// Hash the UTF-8 bytes of `text` with the algorithm named `algorithm`
pub fn hash_text(algorithm: &str, text: &str) -> std::result::Result<String, TransformError> {
    let algorithm =
        Algorithm::from_str(algorithm).ok_or_else(|| TransformError::Hash(format!("unsupported algorithm '{}'", algorithm)))?;
    Ok(algorithm.digest_hex(text.as_bytes()))
}

fn wire(root: &Element) -> Result<()> {
    let algorithm = require(root, ".algorithm-select")?;
    let input = require(root, ".input-text")?;
    let result = require(root, ".result-area")?;
    require(root, ".generate-btn")?.add_event_listener(EventKind::Click, move |e| {
        match hash_text(&algorithm.value(), &input.value()) {
            Ok(digest) => {
                result.set_value(digest);
            }
            Err(err) => e.target.alert(err.to_string()),
        }
    });
    Ok(())
}
