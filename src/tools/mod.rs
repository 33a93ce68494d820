//! Tool System - builtin tools, the catalog that lists them, and shared wiring

pub mod builtin;
mod catalog;
pub mod common;
mod error;

pub use catalog::ToolCatalog;
pub use error::TransformError;
