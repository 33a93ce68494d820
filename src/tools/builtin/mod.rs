//! Builtin tools
//!
//! Each module provides `KIND`, a `descriptor()` with the body markup and its
//! wiring, and the pure transform the wiring calls.

pub mod base64_codec;
pub mod color;
pub mod css_minify;
pub mod hash_gen;
pub mod http_request;
pub mod json_csv;
pub mod json_format;
pub mod jwt;
pub mod markdown;
pub mod regex_tester;
pub mod timestamp;
pub mod url_codec;
pub mod uuid_gen;
