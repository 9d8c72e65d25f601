//! The diagnostic produced by a failed parse.
//!
//! A [`Diagnostic`] pins the furthest position reached by the grammar and
//! lists what would have been accepted there. It renders in two shapes: a
//! one-line [`Display`](fmt::Display) form for logs and a multi-line report
//! with a source excerpt and caret, returned by
//! [`ActionParser::debug`](crate::ActionParser::debug).

use std::fmt;

use crate::{error::ErrorCode, span::Span};

/// Something the grammar would have accepted at the failure position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Expected {
    /// A literal keyword or symbol such as `texture` or `;`.
    Literal(&'static str),
    /// A described class of text such as "a digit".
    Class(&'static str),
    /// The end of the action string.
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Literal(text) => write!(f, "\"{text}\""),
            Expected::Class(description) => f.write_str(description),
            Expected::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// A located parse failure.
///
/// # Example
///
/// ```text
/// Line 1, col 24:
/// > 1 | create texture foo.jpg ^
///                              ^
/// Expected ",", ";", "mask", "name", "tag", a resource path, or end of input
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    code: ErrorCode,
    message: String,
    span: Span,
    line: usize,
    column: usize,
    line_text: String,
    expected: Vec<Expected>,
}

impl Diagnostic {
    /// Build the diagnostic for a failure at byte `offset` of `source`.
    ///
    /// `expected` is sorted (literals, then classes, then end of input) and
    /// deduplicated.
    pub fn at_offset(source: &str, offset: usize, expected: Vec<Expected>) -> Self {
        let offset = floor_char_boundary(source, offset);
        let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
        let line_end = source[offset..]
            .find('\n')
            .map_or(source.len(), |i| offset + i);
        let line = source[..offset].matches('\n').count() + 1;
        let column = source[line_start..offset].chars().count() + 1;

        let (code, message, span) = match source[offset..].chars().next() {
            Some(c) => (
                ErrorCode::E100,
                format!("unexpected character `{}`", c.escape_debug()),
                Span::new(offset..offset + c.len_utf8()),
            ),
            None => (
                ErrorCode::E101,
                ErrorCode::E101.description().to_string(),
                Span::point(offset),
            ),
        };

        let mut expected = expected;
        expected.sort_unstable();
        expected.dedup();

        Self {
            code,
            message,
            span,
            line,
            column,
            line_text: source[line_start..line_end].to_string(),
            expected,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The offending character, or an empty span at the end of input.
    pub fn span(&self) -> Span {
        self.span
    }

    /// One-based line of the failure.
    pub fn line(&self) -> usize {
        self.line
    }

    /// One-based column of the failure, counted in characters.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn expected(&self) -> &[Expected] {
        &self.expected
    }

    /// Label text for the failure position, e.g. `expected ";" or end of input`.
    pub fn label(&self) -> String {
        if self.expected.is_empty() {
            self.code.description().to_string()
        } else {
            format!("expected {}", alternatives(&self.expected))
        }
    }

    /// Render the multi-line report with a caret under the failure column.
    pub fn render(&self) -> String {
        let gutter = format!("> {} | ", self.line);
        let mut report = format!(
            "Line {}, col {}:\n{gutter}{}\n{}^",
            self.line,
            self.column,
            self.line_text,
            " ".repeat(gutter.len() + self.column - 1),
        );
        if !self.expected.is_empty() {
            report.push_str("\nExpected ");
            report.push_str(&alternatives(&self.expected));
        }
        report
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error[{}]: {} at line {}, column {}",
            self.code, self.message, self.line, self.column
        )
    }
}

/// Join alternatives as `a`, `a or b`, or `a, b, or c`.
fn alternatives(expected: &[Expected]) -> String {
    match expected {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => {
            let mut joined = String::new();
            for item in init {
                joined.push_str(&item.to_string());
                joined.push_str(", ");
            }
            joined.push_str("or ");
            joined.push_str(&last.to_string());
            joined
        }
    }
}

fn floor_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
