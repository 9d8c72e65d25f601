//! Error types for the core domain model.

use thiserror::Error;

/// Errors raised while building or naming domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("unknown trigger `{0}`")]
    UnknownTrigger(String),

    #[error("unknown command type `{0}`")]
    UnknownCommand(String),

    /// A command field was assigned a second time.
    #[error("field `{0}` is already set")]
    DuplicateField(String),
}
