//! Constraint violation types.

use crate::{ConstraintError, ConstraintResult};
use sema_core::ElementRef;

/// Severity of a constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationSeverity {
    /// Hard constraint.
    Error,
    /// Soft constraint - warning only.
    Warning,
}

/// A constraint violation.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The constraint that was violated.
    pub constraint_name: String,
    /// Class that declared the constraint.
    pub declaring_class: String,
    pub severity: ViolationSeverity,
    /// Human-readable message describing the violation.
    pub message: String,
    /// The offending element.
    pub element: ElementRef,
}

impl Violation {
    pub fn new(
        constraint_name: impl Into<String>,
        declaring_class: impl Into<String>,
        severity: ViolationSeverity,
        element: ElementRef,
    ) -> Self {
        let constraint_name = constraint_name.into();
        let declaring_class = declaring_class.into();
        let message = format!("{element} violates {declaring_class}::{constraint_name}");
        Self {
            constraint_name,
            declaring_class,
            severity,
            message,
            element,
        }
    }

    /// Check if this is an error-level violation.
    pub fn is_error(&self) -> bool {
        matches!(self.severity, ViolationSeverity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self.severity, ViolationSeverity::Warning)
    }
}

/// Collection of violations.
#[derive(Debug, Clone, Default)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Check if there are any error-level violations.
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.is_error())
    }

    /// Check if there are only warnings.
    pub fn has_only_warnings(&self) -> bool {
        !self.violations.is_empty() && !self.has_errors()
    }

    pub fn all(&self) -> &[Violation] {
        &self.violations
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_warning())
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Merge another violations collection.
    pub fn merge(&mut self, other: Violations) {
        self.violations.extend(other.violations);
    }

    /// Fail on the first error-level violation; warnings pass through.
    pub fn into_result(self) -> ConstraintResult<Violations> {
        let err = self
            .errors()
            .next()
            .map(|v| ConstraintError::violated(&v.constraint_name, v.element));
        match err {
            Some(e) => Err(e),
            None => Ok(self),
        }
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}
