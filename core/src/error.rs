//! Common error types for Sema.

use crate::{ElementRef, InstanceId};
use thiserror::Error;

/// Errors that can occur during graph operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Instance not found in this store.
    #[error("Instance not found: {0}")]
    InstanceNotFound(InstanceId),

    /// Class name not present in the registry.
    #[error("Unknown class: {0}")]
    UnknownClass(String),

    /// Abstract classes cannot be instantiated.
    #[error("Cannot instantiate abstract class: {0}")]
    AbstractClass(String),

    /// The registry must be sealed before a store can use it.
    #[error("Registry is not sealed")]
    RegistryNotSealed,

    /// Attribute not declared on the class or any ancestor.
    #[error("Unknown attribute {attr} on class {class}")]
    UnknownAttribute { class: String, attr: String },

    /// Association end not declared on the class or any ancestor.
    #[error("Unknown association {assoc} on class {class}")]
    UnknownAssociation { class: String, assoc: String },

    /// Type mismatch in attribute.
    #[error("Type mismatch on {attr}: expected {expected}, got {actual}")]
    TypeMismatch {
        attr: String,
        expected: String,
        actual: String,
    },

    /// Link target does not exist.
    #[error("Link target not found: {0}")]
    TargetNotFound(ElementRef),

    /// A bounded association end is already full.
    #[error("Association {assoc} on {instance} allows at most {upper} values")]
    MultiplicityExceeded {
        instance: InstanceId,
        assoc: String,
        upper: u32,
    },

    /// A caller expected exactly one linked value and found none.
    #[error("Required association {assoc} on {instance} has no value")]
    MissingRequired { instance: InstanceId, assoc: String },
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
