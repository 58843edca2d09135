//! Identity error types.

use sema_core::GraphError;
use thiserror::Error;

/// Result type for identity operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Containment cycle through {0}")]
    ContainmentCycle(sema_core::InstanceId),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
