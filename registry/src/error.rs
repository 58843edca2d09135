//! Registry error types.

use thiserror::Error;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Configuration errors raised while building or querying the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate class name: {0}")]
    DuplicateClass(String),

    #[error("Unknown class: {0}")]
    UnknownClass(String),

    #[error("Class {class} declares unknown superclass {superclass}")]
    UnknownSuperclass { class: String, superclass: String },

    #[error("Inheritance cycle detected involving class: {0}")]
    InheritanceCycle(String),

    #[error("Class {class} refers to unknown class {referenced} in a condition")]
    UnknownClassInCondition { class: String, referenced: String },

    #[error("Registry is sealed; cannot {0}")]
    Sealed(&'static str),
}
