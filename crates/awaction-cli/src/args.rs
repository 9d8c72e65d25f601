//! Command-line argument definitions for the awaction CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, logging verbosity and the reporting mode.

use clap::Parser;

/// Command-line arguments for the awaction tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a file with one action string per line, or `-` for stdin
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output JSON file, stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Report only the rejected lines with their diagnostics
    #[arg(long)]
    pub debug: bool,

    /// Fail on the first rejected line instead of emitting an empty mapping
    #[arg(long)]
    pub strict: bool,
}
