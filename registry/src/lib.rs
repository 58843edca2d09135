//! Sema Registry
//!
//! Runtime metamodel lookup. Single source of truth for classes, association
//! ends, constraints and semantic binding rules. Classes may be registered in
//! any order; the registry becomes immutable once sealed.

mod condition;
mod error;
pub mod kernel;
mod registry;
mod types;
mod vocabulary;

pub use condition::Condition;
pub use error::{RegistryError, RegistryResult};
pub use registry::{AliasTable, BoundRule, Registry};
pub use types::*;
pub use vocabulary::Vocabulary;
