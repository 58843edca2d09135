//! Session error types.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("graph error: {0}")]
    Graph(#[from] sema_core::GraphError),

    #[error("binding error: {0}")]
    Binding(#[from] sema_binding::BindingError),

    #[error("name error: {0}")]
    Name(#[from] sema_names::NameError),

    #[error("identity error: {0}")]
    Identity(#[from] sema_identity::IdentityError),

    #[error("constraint error: {0}")]
    Constraint(#[from] sema_constraint::ConstraintError),

    /// A library with this mount id is already registered.
    #[error("mount already registered: {id}")]
    DuplicateMount { id: String },
}

impl SessionError {
    pub fn duplicate_mount(id: impl Into<String>) -> Self {
        Self::DuplicateMount { id: id.into() }
    }
}
