//! Reader errors

use thiserror::Error;

/// Result of reading or resolving text.
pub type ReadResult<T> = Result<T, ReadError>;

/// Structural errors of the textual notation and of name resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("Unbalanced block")]
    Unbalanced,

    #[error("`{0}`: words of length <= 2 are reserved")]
    Reserved(String),

    #[error("`{0}`: unrecognized word")]
    UnknownWord(String),

    #[error("`{0}`: invalid number")]
    BadNumber(String),

    #[error("`{0}` contains a cycle")]
    Cycle(String),

    #[error("`{name}` cannot be resolved: {reason}")]
    Missing { name: String, reason: String },
}

impl ReadError {
    pub(crate) fn missing(
        name: &str,
        reason: impl Into<String>,
    ) -> Self {
        ReadError::Missing {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
