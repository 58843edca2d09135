//! Binding error types.

use sema_core::GraphError;
use sema_registry::RegistryError;
use thiserror::Error;

/// Result type for binding operations.
pub type BindingResult<T> = Result<T, BindingError>;

/// Errors that can occur while processing pending bindings.
#[derive(Debug, Error)]
pub enum BindingError {
    #[error("Step limit ({limit}) exceeded; {remaining} instances left pending")]
    StepLimitExceeded { limit: usize, remaining: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl BindingError {
    pub fn step_limit_exceeded(limit: usize, remaining: usize) -> Self {
        Self::StepLimitExceeded { limit, remaining }
    }
}
