//! Error types for the awaction CLI.

use std::{io, path::PathBuf};

use thiserror::Error;

use awaction_parser::ParseError;

/// The main error type for CLI runs.
///
/// The `Parse` variant keeps the rejected line so the diagnostic can be
/// rendered against its source.
#[derive(Debug, Error)]
pub enum AwActionError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("line {line}: {err}")]
    Parse {
        line: usize,
        err: ParseError,
        src: String,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AwActionError {
    /// Create a new `Parse` error for the action string on `line`.
    pub fn new_parse_error(line: usize, err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            line,
            err,
            src: src.into(),
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),
}
