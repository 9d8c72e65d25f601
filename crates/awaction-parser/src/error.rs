//! Error and diagnostic system for the action string parser.
//!
//! A failed parse produces exactly one [`Diagnostic`]: the furthest position
//! the grammar reached together with every token it would have accepted
//! there. The diagnostic is wrapped in a [`ParseError`] for returning from
//! [`ActionParser::try_parse`](crate::ActionParser::try_parse).
//!
//! # Example
//!
//! ```
//! # use awaction_parser::ActionParser;
//! # use awaction_parser::error::ErrorCode;
//! let parser = ActionParser::new();
//! let err = parser.try_parse("create texture foo.jpg ^").unwrap_err();
//!
//! let diagnostic = err.diagnostic();
//! assert_eq!(diagnostic.code(), ErrorCode::E100);
//! assert_eq!(diagnostic.column(), 24);
//! ```

mod diagnostic;
mod error_code;
mod parse_error;

pub use diagnostic::{Diagnostic, Expected};
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
