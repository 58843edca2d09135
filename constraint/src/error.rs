//! Constraint error types.

use sema_core::{ElementRef, GraphError};
use sema_registry::RegistryError;
use thiserror::Error;

/// Result type for constraint operations.
pub type ConstraintResult<T> = Result<T, ConstraintError>;

/// Errors that can occur during constraint checking.
#[derive(Debug, Error)]
pub enum ConstraintError {
    #[error("Constraint {name} violated by {element}")]
    Violated { name: String, element: ElementRef },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ConstraintError {
    pub fn violated(name: impl Into<String>, element: ElementRef) -> Self {
        Self::Violated {
            name: name.into(),
            element,
        }
    }
}
