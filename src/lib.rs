//! devdash - a terminal dashboard of single-purpose developer tools
//!
//! Tools are cards on a dashboard. Each card is a small document subtree built
//! from its tool's markup template, with behavior attached by the tool's wiring
//! function. The TUI and the headless `run` command drive the same documents.

pub mod config;
pub mod dom;
pub mod error;
pub mod id;
pub mod shell;
pub mod tools;
pub mod tui;

pub use error::{DashError, Result};
