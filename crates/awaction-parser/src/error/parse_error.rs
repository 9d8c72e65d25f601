//! The ParseError type returned by a failed parse.

use thiserror::Error;

use crate::error::Diagnostic;

/// Error type for a rejected action string.
///
/// Wraps the diagnostic describing the furthest failure position.
#[derive(Debug, Clone, Error)]
#[error("{diagnostic}")]
pub struct ParseError {
    diagnostic: Diagnostic,
}

impl ParseError {
    pub fn new(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// The human readable failure report, as returned by
    /// [`ActionParser::debug`](crate::ActionParser::debug).
    pub fn report(&self) -> String {
        self.diagnostic.render()
    }
}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(diagnostic)
    }
}
