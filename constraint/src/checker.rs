//! Constraint checking.

use sema_binding::ConditionEvaluator;
use sema_core::{ElementRef, GraphError, InstanceId};
use sema_graph::GraphView;
use tracing::{debug, info};

use crate::error::ConstraintResult;
use crate::violation::{Violation, ViolationSeverity, Violations};

/// Constraint checker.
///
/// Checks elements of any graph visible through the view; `check_all` walks
/// the view's local graph.
pub struct ConstraintChecker<'v, V: ?Sized> {
    view: &'v V,
}

impl<'v, V: GraphView + ?Sized> ConstraintChecker<'v, V> {
    pub fn new(view: &'v V) -> Self {
        Self { view }
    }

    /// Check one instance of the local graph.
    pub fn check_instance(&self, id: InstanceId) -> ConstraintResult<Violations> {
        let local = self
            .view
            .graphs()
            .into_iter()
            .next()
            .ok_or(GraphError::InstanceNotFound(id))?;
        self.check_element(local.element_ref(id))
    }

    /// Check every constraint the element's class declares or inherits.
    pub fn check_element(&self, element: ElementRef) -> ConstraintResult<Violations> {
        let mut violations = Violations::new();

        let class_name = self
            .view
            .class_name(element)
            .ok_or(GraphError::InstanceNotFound(element.instance))?;

        let registry = self.view.registry();
        let evaluator = ConditionEvaluator::new(self.view);
        for class in registry.collect_ancestry(class_name)? {
            for constraint in &class.constraints {
                if evaluator.evaluate(element, &constraint.condition) {
                    continue;
                }
                let severity = if constraint.hard {
                    ViolationSeverity::Error
                } else {
                    ViolationSeverity::Warning
                };
                debug!(element = %element, constraint = %constraint.name, ?severity, "constraint violated");
                violations.push(Violation::new(&constraint.name, &class.name, severity, element));
            }
        }

        Ok(violations)
    }

    /// Check all instances of the local graph.
    pub fn check_all(&self) -> ConstraintResult<Violations> {
        let mut violations = Violations::new();

        let Some(local) = self.view.graphs().into_iter().next() else {
            return Ok(violations);
        };
        for instance in local.all_instances() {
            violations.merge(self.check_element(local.element_ref(instance.id))?);
        }

        info!(
            instances = local.len(),
            errors = violations.errors().count(),
            warnings = violations.warnings().count(),
            "constraints checked"
        );
        Ok(violations)
    }
}
