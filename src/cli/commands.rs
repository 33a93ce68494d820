//! CLI command definitions using clap.
//!
//! - list: list the available tools
//! - run: drive one tool headless and print its controls

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// devdash - developer utility tools in one terminal dashboard
#[derive(Parser, Debug)]
#[command(name = "devdash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the available tools
    List,

    /// Open one tool without the TUI, type into it, and press its buttons
    Run {
        /// Tool kind, as shown by `list`
        kind: String,

        /// Type VALUE into the control with class CLASS (repeatable)
        #[arg(short, long, value_name = "CLASS=VALUE")]
        set: Vec<String>,

        /// Click the button with class CLASS, in order (repeatable)
        #[arg(short = 'k', long, value_name = "CLASS")]
        click: Vec<String>,
    },
}

/// Split a `CLASS=VALUE` assignment
pub fn parse_assignment(raw: &str) -> Option<(&str, &str)> {
    let (class, value) = raw.split_once('=')?;
    let class = class.trim();
    (!class.is_empty()).then_some((class, value))
}
