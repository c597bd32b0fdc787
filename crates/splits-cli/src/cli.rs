//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Speedrun split timer.
///
/// Times a run across named splits, compares it against the saved
/// projection and saves improved times back to the run file.
#[derive(Debug, Parser)]
#[command(name = "splits", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List run files.
    List {
        /// Directory to search instead of the configured one.
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Show a run's splits and cumulative projected times.
    Show {
        /// Run file, or its name inside the runs directory.
        run: PathBuf,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Time a run, reading one key per line from stdin.
    Play {
        /// Run file, or its name inside the runs directory.
        run: PathBuf,
    },
}
