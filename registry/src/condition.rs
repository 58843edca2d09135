//! Declarative condition trees attached to binding rules and constraints.

use sema_core::Value;

/// A boolean condition evaluated against one instance's current state.
///
/// Property names refer to attributes or association ends; association ends
/// are navigated with subset/redefine aliasing applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Condition {
    /// Always true.
    #[default]
    Always,
    /// All children hold (short-circuits on the first false).
    And(Vec<Condition>),
    /// Any child holds (short-circuits on the first true).
    Or(Vec<Condition>),
    /// Negation.
    Not(Box<Condition>),
    /// The attribute equals the value.
    PropertyEquals(String, Value),
    /// The association end holds exactly `n` values.
    CollectionSizeEquals(String, usize),
    /// The association end does not hold exactly `n` values.
    CollectionSizeNotEquals(String, usize),
    /// The association end holds at least one value.
    CollectionNotEmpty(String),
    /// Some value of the association end is an instance of the class.
    HasElementOfClass(String, String),
    /// Some type of the instance is an instance of the metaclass.
    TypedBy(String),
    /// The owning type of the instance is an instance of the metaclass.
    OwningTypeIs(String),
    /// Some type of the owning type is an instance of the metaclass.
    OwningTypeTypedBy(String),
    /// The instance is an end feature.
    IsEnd,
    /// The instance is a composite feature.
    IsComposite,
    /// The instance is a portion feature.
    IsPortion,
}

impl Condition {
    pub fn and(children: impl IntoIterator<Item = Condition>) -> Self {
        Condition::And(children.into_iter().collect())
    }

    pub fn or(children: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Or(children.into_iter().collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(child: Condition) -> Self {
        Condition::Not(Box::new(child))
    }

    pub fn property_equals(prop: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::PropertyEquals(prop.into(), value.into())
    }

    pub fn size_equals(prop: impl Into<String>, n: usize) -> Self {
        Condition::CollectionSizeEquals(prop.into(), n)
    }

    pub fn size_not_equals(prop: impl Into<String>, n: usize) -> Self {
        Condition::CollectionSizeNotEquals(prop.into(), n)
    }

    pub fn not_empty(prop: impl Into<String>) -> Self {
        Condition::CollectionNotEmpty(prop.into())
    }

    pub fn has_element_of_class(prop: impl Into<String>, class: impl Into<String>) -> Self {
        Condition::HasElementOfClass(prop.into(), class.into())
    }

    pub fn typed_by(class: impl Into<String>) -> Self {
        Condition::TypedBy(class.into())
    }

    pub fn owning_type_is(class: impl Into<String>) -> Self {
        Condition::OwningTypeIs(class.into())
    }

    pub fn owning_type_typed_by(class: impl Into<String>) -> Self {
        Condition::OwningTypeTypedBy(class.into())
    }

    /// Class names this condition refers to, in tree order.
    pub fn referenced_classes(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_classes(&mut out);
        out
    }

    fn collect_classes<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Condition::And(children) | Condition::Or(children) => {
                for child in children {
                    child.collect_classes(out);
                }
            }
            Condition::Not(child) => child.collect_classes(out),
            Condition::HasElementOfClass(_, class)
            | Condition::TypedBy(class)
            | Condition::OwningTypeIs(class)
            | Condition::OwningTypeTypedBy(class) => out.push(class),
            Condition::Always
            | Condition::PropertyEquals(..)
            | Condition::CollectionSizeEquals(..)
            | Condition::CollectionSizeNotEquals(..)
            | Condition::CollectionNotEmpty(_)
            | Condition::IsEnd
            | Condition::IsComposite
            | Condition::IsPortion => {}
        }
    }
}
