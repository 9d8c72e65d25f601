//! awaction CLI library
//!
//! This module contains the core CLI logic: every line of the input is
//! parsed as one action string and the results are written as JSON.

pub mod config;
pub mod error;
pub mod error_adapter;

mod args;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::{debug, info, warn};
use serde::Serialize;

use awaction_core::action::ActionMap;
use awaction_parser::ActionParser;

use config::{AppConfig, InputConfig};
use error::AwActionError;

/// A parsed input line.
#[derive(Debug, Serialize)]
struct ParsedLine<'a> {
    line: usize,
    source: &'a str,
    actions: ActionMap,
}

/// An input line the grammar rejected.
#[derive(Debug, Serialize)]
struct RejectedLine<'a> {
    line: usize,
    source: &'a str,
    diagnostic: String,
}

/// Run the awaction CLI application
///
/// Reads the input, parses each action string line and writes a JSON array
/// to the output file, or to stdout when no output path is given.
///
/// # Errors
///
/// Returns `AwActionError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Rejected action strings in strict mode
/// - JSON serialization errors
pub fn run(args: &Args) -> Result<(), AwActionError> {
    info!(
        input_path = args.input,
        debug = args.debug,
        strict = args.strict;
        "Processing action strings"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = read_input(&args.input)?;

    let json = render(&source, &app_config, args)?;
    write_output(args.output.as_deref(), &json)?;

    info!(output = args.output.as_deref().unwrap_or("-"); "Actions written successfully");

    Ok(())
}

/// Parse `source` line by line and serialize the report selected by `args`.
fn render(source: &str, config: &AppConfig, args: &Args) -> Result<String, AwActionError> {
    let parser = ActionParser::new();
    let lines = action_lines(source, &config.input);

    let json = if args.debug {
        let rejected: Vec<_> = lines
            .map(|(line, source)| RejectedLine {
                line,
                source,
                diagnostic: parser.debug(source),
            })
            .filter(|rejected| !rejected.diagnostic.is_empty())
            .collect();
        debug!(count = rejected.len(); "Collected rejected lines");
        to_json(&rejected, config.output.pretty)?
    } else {
        let mut parsed = Vec::new();
        for (line, source) in lines {
            let actions = match parser.try_parse(source) {
                Ok(actions) => actions,
                Err(err) if args.strict => {
                    return Err(AwActionError::new_parse_error(line, err, source));
                }
                Err(err) => {
                    warn!(line, err:%; "Action string rejected");
                    ActionMap::new()
                }
            };
            parsed.push(ParsedLine {
                line,
                source,
                actions,
            });
        }
        debug!(count = parsed.len(); "Parsed action strings");
        to_json(&parsed, config.output.pretty)?
    };

    Ok(json)
}

/// Number the lines of `source` from 1, dropping the ones `config` skips.
fn action_lines<'a>(
    source: &'a str,
    config: &InputConfig,
) -> impl Iterator<Item = (usize, &'a str)> {
    let skip_comments = config.skip_comments;
    let skip_blank_lines = config.skip_blank_lines;

    source
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(move |(_, line)| {
            let trimmed = line.trim_start();
            let blank = skip_blank_lines && trimmed.is_empty();
            let comment = skip_comments && trimmed.starts_with('#');
            !(blank || comment)
        })
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, AwActionError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn read_input(path: &str) -> Result<String, AwActionError> {
    if path == "-" {
        Ok(io::read_to_string(io::stdin())?)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn write_output(path: Option<&str>, json: &str) -> Result<(), AwActionError> {
    match path {
        Some(path) if path != "-" => fs::write(path, format!("{json}\n"))?,
        _ => writeln!(io::stdout().lock(), "{json}")?,
    }
    Ok(())
}
