//! CLI module for devdash - command-line interface and subcommands.
//!
//! With no subcommand the dashboard TUI is launched.

pub mod commands;

pub use commands::Cli;
