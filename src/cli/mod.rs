//! CLI argument definitions for rusky.

use crate::commands::StatusFilter;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("RUSKY_GIT_COMMIT"),
    " ",
    env!("RUSKY_BUILD_TIMESTAMP"),
    ")"
);

/// Rusky - A technical debt tracker for your codebase.
///
/// Run without a subcommand to browse items interactively.
#[derive(Parser, Debug)]
#[command(name = "rusky")]
#[command(author, version, long_version = LONG_VERSION, about = "Track and discover technical debt in your codebase", long_about = None)]
pub struct Cli {
    /// Output in JSON format instead of human-readable text
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Run as if rusky was started in <path> instead of the current directory.
    /// The path must exist. Bypasses git root detection - uses the path literally.
    /// Can also be set via RUSKY_REPO environment variable.
    #[arg(short = 'C', long = "repo", global = true, env = "RUSKY_REPO")]
    pub repo_path: Option<PathBuf>,

    /// Item file to use, relative to the project root unless absolute
    #[arg(long = "file", global = true, env = "RUSKY_FILE")]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new technical debt item
    Add {
        /// Item description (remaining words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Mark a debt item as completed
    Complete {
        /// Item id or 1-based index as shown by `rusky list`
        identifier: String,
    },

    /// Mark a completed debt item as open again
    Reopen {
        /// Item id or 1-based index as shown by `rusky list`
        identifier: String,
    },

    /// List technical debt items
    List {
        /// Only show items with this status
        #[arg(long, value_enum, default_value_t = StatusFilter::All)]
        status: StatusFilter,
    },

    /// Scan the codebase for TODO, FIXME, HACK, XXX, BUG and NOTE comments
    ///
    /// Without --dry-run or --add-all the findings are reviewed in an
    /// interactive selector.
    Scan {
        /// Directory (or file) to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Preview scan results without adding items
        #[arg(long, conflicts_with = "add_all")]
        dry_run: bool,

        /// Add all found items without confirmation
        #[arg(long)]
        add_all: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show resolved configuration values and their sources
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (output-format, data-file, preview-limit)
        key: String,
        /// Configuration value
        value: String,
        /// Write to the system config instead of the project's .rusky.kdl
        #[arg(long)]
        system: bool,
    },
}
