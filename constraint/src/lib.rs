//! Sema Constraint
//!
//! Validate instances against the constraints declared in the registry.
//!
//! Responsibilities:
//! - Collect constraints inherited through the class hierarchy
//! - Evaluate their conditions with the binding condition evaluator
//! - Distinguish hard (error) vs soft (warning) constraints
//! - Produce meaningful violation messages

mod checker;
mod error;
mod violation;

pub use checker::ConstraintChecker;
pub use error::{ConstraintError, ConstraintResult};
pub use violation::{Violation, ViolationSeverity, Violations};
