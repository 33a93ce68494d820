//! User-facing failures of tool transforms
//!
//! The `Display` text of each variant is exactly what the tool shows in its
//! notification.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// Nothing to work on; carries the prompt shown to the user
    #[error("{0}")]
    EmptyInput(&'static str),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Input is not a JSON array of objects
    #[error("Invalid JSON")]
    InvalidTable,

    #[error("Encoding failed: {0}")]
    Encoding(String),

    #[error("Decoding failed: {0}")]
    Decoding(String),

    #[error("Invalid regex: {0}")]
    InvalidRegex(String),

    #[error("Hash generation failed: {0}")]
    Hash(String),

    #[error("Invalid timestamp")]
    InvalidTimestamp,

    #[error("Invalid date")]
    InvalidDate,

    #[error("Invalid color format")]
    InvalidColor,

    #[error("Invalid JWT")]
    InvalidJwt,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to copy: {0}")]
    Clipboard(String),
}
