//! CLI argument parsing for tmpsweep.
//!
//! Uses clap derive macros. The entry point in `main.rs` consumes this,
//! initializes logging, and hands the parsed options to the cleaner.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Tmpsweep: single-pass temp cleaner with per-rule cleanup statistics.
///
/// Walks the configured root bottom-up exactly once, removes files and
/// directories matching the configured definitions, and prints a summary
/// table of what was removed, what failed, and what remains.
#[derive(Parser, Debug)]
#[command(name = "tmpsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the YAML configuration file.
    pub config: PathBuf,

    /// Report what would be removed without touching the filesystem.
    /// Also skips the PID file.
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
