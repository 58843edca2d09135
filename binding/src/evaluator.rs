//! Condition evaluation.

use sema_core::{ElementRef, Value};
use sema_graph::GraphView;
use sema_registry::Condition;

/// Evaluates condition trees against one element's current state.
///
/// Evaluation is pure. Unknown properties read as absent and unknown
/// association ends as empty.
pub struct ConditionEvaluator<'v, V: ?Sized> {
    view: &'v V,
}

impl<'v, V: GraphView + ?Sized> ConditionEvaluator<'v, V> {
    pub fn new(view: &'v V) -> Self {
        Self { view }
    }

    /// Evaluate a condition for an element.
    pub fn evaluate(&self, element: ElementRef, condition: &Condition) -> bool {
        let vocab = self.view.registry().vocabulary();
        match condition {
            Condition::Always => true,
            Condition::And(children) => children.iter().all(|c| self.evaluate(element, c)),
            Condition::Or(children) => children.iter().any(|c| self.evaluate(element, c)),
            Condition::Not(child) => !self.evaluate(element, child),
            Condition::PropertyEquals(prop, expected) => {
                self.view.property(element, prop).unwrap_or(&Value::Null) == expected
            }
            Condition::CollectionSizeEquals(prop, n) => self.size(element, prop) == *n,
            Condition::CollectionSizeNotEquals(prop, n) => self.size(element, prop) != *n,
            Condition::CollectionNotEmpty(prop) => self.size(element, prop) > 0,
            Condition::HasElementOfClass(prop, class) => self.any_of_class(element, prop, class),
            Condition::TypedBy(class) => self.any_of_class(element, &vocab.type_end, class),
            Condition::OwningTypeIs(class) => self
                .view
                .first_link(element, &vocab.owning_type)
                .is_some_and(|owner| self.view.is_a(owner, class)),
            Condition::OwningTypeTypedBy(class) => self
                .view
                .first_link(element, &vocab.owning_type)
                .is_some_and(|owner| self.any_of_class(owner, &vocab.type_end, class)),
            Condition::IsEnd => self.flag(element, &vocab.is_end),
            Condition::IsComposite => self.flag(element, &vocab.is_composite),
            Condition::IsPortion => self.flag(element, &vocab.is_portion),
        }
    }

    fn size(&self, element: ElementRef, prop: &str) -> usize {
        self.view.links_or_empty(element, prop).len()
    }

    fn any_of_class(&self, element: ElementRef, prop: &str, class: &str) -> bool {
        self.view
            .links_or_empty(element, prop)
            .into_iter()
            .any(|value| self.view.is_a(value, class))
    }

    fn flag(&self, element: ElementRef, name: &str) -> bool {
        self.view
            .property(element, name)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}
