//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Event feed client CLI
#[derive(Parser, Debug)]
#[command(name = "eventfeed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Search profile file (YAML)
    #[arg(short, long, global = true)]
    pub profile: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a full paginated search and print the results
    Search {
        /// Override the profile's base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Override the profile's cities (comma-separated, primary first)
        #[arg(long)]
        cities: Option<String>,

        /// Override the profile's category IDs (comma-separated)
        #[arg(long)]
        categories: Option<String>,
    },

    /// Parse a profile and echo the effective filters
    Validate,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one event per line)
    Json,
    /// Human-readable output
    Pretty,
}
