use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docsite-filter")]
#[command(about = "Search generated documentation pages like their search bar does", long_about = None)]
pub struct Cli {
    /// Config file (defaults to $DOCSITE_FILTER_CONFIG or the user config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the MCP tools over stdio (default)
    Serve,
    /// Filter a page, or every page under a directory, and print what stays visible
    Filter {
        path: PathBuf,
        query: String,
    },
    /// Compare two versions the way the `+` filter does
    Compare {
        base: String,
        target: String,
    },
    /// Expand ${latest-version} and ${contributors-size} in a file
    Expand {
        file: PathBuf,
    },
}
