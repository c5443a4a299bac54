//! Command line argument parsing for the lexindex CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// lexindex - build an in-memory inverted index over a directory and query it
#[derive(Parser, Debug, Clone)]
#[command(name = "lexindex")]
#[command(about = "Concurrent in-memory inverted index over a directory of text files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LexIndexArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Indexer configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory to index (overrides the configuration file)
    #[arg(short, long, env = "LEXINDEX_ROOT", global = true)]
    pub root: Option<PathBuf>,

    /// Skip unreadable documents instead of failing the build
    #[arg(long, global = true)]
    pub skip_unreadable: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LexIndexArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build the index and report how long it took
    Index(IndexArgs),

    /// Build the index, then look up one word
    Query(QueryArgs),

    /// Keep one index in memory and read commands from stdin
    Shell(ShellArgs),
}

/// Arguments for building an index
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    /// Number of worker threads
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Include the per-worker breakdown
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for a one-shot query
#[derive(Parser, Debug, Clone)]
pub struct QueryArgs {
    /// Word to look up
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Number of worker threads for the build
    #[arg(short, long)]
    pub workers: Option<usize>,
}

/// Arguments for the interactive shell
#[derive(Parser, Debug, Clone)]
pub struct ShellArgs {
    /// Build the index with this many workers before reading commands
    #[arg(long, value_name = "WORKERS")]
    pub build_on_start: Option<usize>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
