// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// There are no subcommands: the tool fetches one listing, optionally
// exports it, then drops into the interactive browser.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use crate::config::{EXPORT_DIR, REPOS_PER_PAGE};
use crate::trending::DateRange;

#[derive(Parser, Debug)]
#[command(
    name = "github-trending",
    version,
    about = "Browse GitHub trending repositories from the command line",
    after_help = "Examples:\n  \
                  github-trending                    # Show today's trending repos\n  \
                  github-trending --range weekly     # Show this week's trending repos\n  \
                  github-trending --export --format json"
)]
pub struct Cli {
    /// Time range for trending repositories
    #[arg(short, long, value_enum, default_value_t = DateRange::Daily)]
    pub range: DateRange,

    /// Export the fetched repositories before browsing
    #[arg(long)]
    pub export: bool,

    /// Export format: csv or json (JSON Lines)
    ///
    /// Kept as a plain string so a bad value is reported as an export
    /// failure (exit code 1) instead of a usage error.
    #[arg(long, default_value = "csv")]
    pub format: String,

    /// Directory export files are written to
    #[arg(long, default_value = EXPORT_DIR)]
    pub export_dir: PathBuf,

    /// Repositories revealed per page
    #[arg(long, default_value_t = REPOS_PER_PAGE)]
    pub page_size: usize,

    /// README lines per screen (defaults to the terminal height)
    #[arg(long)]
    pub readme_lines: Option<usize>,

    /// Per-request timeout in seconds (defaults to the HTTP client's own)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Show debug diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
