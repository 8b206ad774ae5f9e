//! CLI module
//!
//! Command-line interface for running searches against an event feed.
//!
//! # Commands
//!
//! - `search` - Run a full paginated load under a profile and print the results
//! - `validate` - Parse a profile and echo the effective filters

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
