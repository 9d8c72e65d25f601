//! Error codes for the action string diagnostic system.
//!
//! Only grammar failures are reported as diagnostics; semantic problems
//! (duplicate arguments, empty commands) silently drop the affected command.
//! The codes keep the `E1xx` parser range.

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Unexpected input.
    ///
    /// The grammar could not continue at this position and the remaining
    /// text is not a valid continuation of the action string.
    E100,

    /// Incomplete input.
    ///
    /// The action string ended where the grammar still required more text,
    /// for example a trigger keyword with nothing after it.
    E101,
}

impl ErrorCode {
    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
        }
    }

    /// Get a short description of this error code.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unexpected input",
            ErrorCode::E101 => "unexpected end of input",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E101.as_str(), "E101");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E100.description(), "unexpected input");
        assert_eq!(ErrorCode::E101.description(), "unexpected end of input");
    }
}
