//! # Active Worlds Action Parser
//!
//! Parser for Active Worlds object action strings. An action string binds
//! commands to triggers:
//!
//! ```text
//! create texture stone.jpg, color red; activate move 0 1 0 time=2
//! ```
//!
//! Parsing runs in four stages:
//!
//! 1. **Match** - the grammar turns the cleaned text into a syntax tree
//! 2. **Interpret** - every argument becomes a named, typed value
//! 3. **Resolve** - a command's values are folded into a [`Command`]
//! 4. **Merge** - commands and triggers are deduplicated into an [`ActionMap`]
//!
//! ## Usage
//!
//! ```
//! use awaction_core::trigger::Trigger;
//! use awaction_parser::ActionParser;
//!
//! let parser = ActionParser::new();
//! let actions = parser.parse("create texture stone.jpg, color red");
//!
//! let create = actions.get(Trigger::Create).unwrap();
//! assert_eq!(create[0].command_type(), "texture");
//! assert_eq!(create[1].command_type(), "color");
//!
//! // A string the grammar rejects parses to an empty map; `debug` says why.
//! assert!(parser.parse("create examine ^^").is_empty());
//! assert!(parser.debug("create examine ^^").starts_with("Line 1, col 16:"));
//! ```
//!
//! [`Command`]: awaction_core::command::Command

mod coerce;
pub mod error;
mod grammar;
mod interpret;
mod merge;
mod resolve;
mod span;
mod syntax;

use std::{borrow::Cow, sync::LazyLock};

use log::{debug, trace};

use awaction_core::action::ActionMap;

pub use error::ParseError;
pub use merge::{RawAction, merge_actions, merge_commands};
pub use span::Span;

use error::Diagnostic;
use grammar::Grammar;

/// Characters found in some property dumps that are removed before matching.
const UNWANTED_CHARS: [char; 2] = ['\u{7f}', '\u{80}'];

static SHARED: LazyLock<ActionParser> = LazyLock::new(ActionParser::new);

/// Remove the stray control characters that property dumps may contain.
pub fn clean_action_string(action_string: &str) -> Cow<'_, str> {
    if action_string.contains(UNWANTED_CHARS) {
        Cow::Owned(action_string.replace(UNWANTED_CHARS, ""))
    } else {
        Cow::Borrowed(action_string)
    }
}

/// An action string parser.
///
/// The grammar is built once by [`ActionParser::new`] and never modified
/// afterwards, so a single parser can be shared between threads. Each call
/// keeps its matching state to itself.
#[derive(Debug, Default)]
pub struct ActionParser {
    grammar: Grammar,
}

impl ActionParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an action string, returning an empty map when it is rejected.
    pub fn parse(&self, action_string: &str) -> ActionMap {
        self.try_parse(action_string).unwrap_or_default()
    }

    /// Parse an action string.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] locating the furthest point the grammar
    /// reached when the string is not a valid action string.
    pub fn try_parse(&self, action_string: &str) -> Result<ActionMap, ParseError> {
        let raw = self.parse_raw(action_string)?;
        Ok(merge_actions(raw))
    }

    /// Match and resolve an action string without merging.
    ///
    /// Every trigger occurrence is returned in source order with its
    /// commands, including those the resolver discarded (as `None`) and
    /// unrecognized ones.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the string is not a valid action string.
    pub fn parse_raw(&self, action_string: &str) -> Result<Vec<RawAction>, ParseError> {
        let source = clean_action_string(action_string);
        trace!(len = source.len(); "Matching action string");

        let nodes = self.grammar.parse(&source).map_err(|failure| {
            let diagnostic = Diagnostic::at_offset(&source, failure.offset, failure.expected);
            debug!(diagnostic:%; "Action string rejected");
            ParseError::from(diagnostic)
        })?;

        Ok(nodes
            .into_iter()
            .map(|node| {
                let commands = node.commands.into_iter().map(resolve::resolve).collect();
                RawAction::new(node.trigger, commands)
            })
            .collect())
    }

    /// Explain why an action string is rejected.
    ///
    /// Returns an empty string when the grammar accepts the string, even if
    /// every command in it is later dropped.
    pub fn debug(&self, action_string: &str) -> String {
        let source = clean_action_string(action_string);
        match self.grammar.parse(&source) {
            Ok(_) => String::new(),
            Err(failure) => {
                Diagnostic::at_offset(&source, failure.offset, failure.expected).render()
            }
        }
    }
}

/// Parse with a lazily built parser shared by the whole process.
///
/// See [`ActionParser::parse`].
pub fn parse(action_string: &str) -> ActionMap {
    SHARED.parse(action_string)
}

/// Explain a rejected action string with the shared parser.
///
/// See [`ActionParser::debug`].
pub fn debug(action_string: &str) -> String {
    SHARED.debug(action_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_unwanted_chars() {
        assert_eq!(
            clean_action_string("create\u{7f} examine\u{80}"),
            "create examine"
        );
        assert!(matches!(
            clean_action_string("create examine"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_parser_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ActionParser>();
    }

    #[test]
    fn test_parse_raw_keeps_discarded_commands() {
        let raw = ActionParser::new()
            .parse_raw("create texture a.jpg b.jpg, bogus")
            .unwrap();

        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].commands.len(), 2);
        assert!(raw[0].commands[0].is_none());
        assert!(raw[0].commands[1].is_some());
    }
}
