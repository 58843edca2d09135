//! Name layer error types.

use sema_core::GraphError;
use thiserror::Error;

/// Result type for name operations.
pub type NameResult<T> = Result<T, NameError>;

/// Errors raised by qualified-name parsing and containment helpers.
#[derive(Debug, Error)]
pub enum NameError {
    #[error("Malformed qualified name {name}: {reason}")]
    Malformed { name: String, reason: &'static str },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl NameError {
    pub fn malformed(name: impl Into<String>, reason: &'static str) -> Self {
        Self::Malformed {
            name: name.into(),
            reason,
        }
    }
}
