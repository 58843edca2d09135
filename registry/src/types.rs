//! Schema definition types.

use crate::Condition;
use sema_core::Value;

/// Attribute definition within a class.
#[derive(Debug, Clone)]
pub struct AttributeDef {
    /// Attribute name.
    pub name: String,
    /// Value kind (Bool, Int, Float, String, or Any).
    pub type_name: String,
    /// Default value applied when an instance is created.
    pub default: Option<Value>,
}

impl AttributeDef {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Association end definition within a class.
#[derive(Debug, Clone)]
pub struct AssociationEndDef {
    /// End name, used as the link slot name.
    pub name: String,
    /// Class of the linked elements.
    pub target_class: String,
    /// Lower multiplicity bound.
    pub lower: u32,
    /// Upper multiplicity bound; `None` means unbounded.
    pub upper: Option<u32>,
    /// More general ends whose navigation also yields this end's values.
    pub subsets: Vec<String>,
    /// Ends whose values are stored in this end instead.
    pub redefines: Vec<String>,
}

impl AssociationEndDef {
    /// An unbounded end.
    pub fn new(name: impl Into<String>, target_class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_class: target_class.into(),
            lower: 0,
            upper: None,
            subsets: Vec::new(),
            redefines: Vec::new(),
        }
    }

    /// Set the multiplicity bounds.
    pub fn multiplicity(mut self, lower: u32, upper: Option<u32>) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    /// Shorthand for `[0..1]`.
    pub fn optional(self) -> Self {
        self.multiplicity(0, Some(1))
    }

    /// Shorthand for `[1..1]`.
    pub fn required(self) -> Self {
        self.multiplicity(1, Some(1))
    }

    pub fn subsets(mut self, general: impl Into<String>) -> Self {
        self.subsets.push(general.into());
        self
    }

    pub fn redefines(mut self, redefined: impl Into<String>) -> Self {
        self.redefines.push(redefined.into());
        self
    }

    /// Returns true if at most one value may be linked.
    pub fn is_single_valued(&self) -> bool {
        self.upper == Some(1)
    }
}

/// Constraint definition.
#[derive(Debug, Clone)]
pub struct ConstraintDef {
    /// Constraint name.
    pub name: String,
    /// Whether this is a hard constraint (must be satisfied).
    pub hard: bool,
    /// Condition every instance of the class must satisfy.
    pub condition: Condition,
}

impl ConstraintDef {
    pub fn new(name: impl Into<String>, condition: Condition) -> Self {
        Self {
            name: name.into(),
            hard: true,
            condition,
        }
    }

    pub fn soft(mut self) -> Self {
        self.hard = false;
        self
    }
}

/// Which relationship a binding rule implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// The instance specializes the target concept.
    Specializes,
    /// The instance subsets the target concept.
    Subsets,
}

/// A semantic binding rule declared on a class.
#[derive(Debug, Clone)]
pub struct BindingRule {
    /// Qualified name of the library concept.
    pub target_concept_name: String,
    /// Relationship kind to imply.
    pub kind: BindingKind,
    /// When the rule applies.
    pub condition: Condition,
}

impl BindingRule {
    pub fn specializes(target: impl Into<String>) -> Self {
        Self {
            target_concept_name: target.into(),
            kind: BindingKind::Specializes,
            condition: Condition::Always,
        }
    }

    pub fn subsets(target: impl Into<String>) -> Self {
        Self {
            target_concept_name: target.into(),
            kind: BindingKind::Subsets,
            condition: Condition::Always,
        }
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }
}

/// Class definition.
#[derive(Debug, Clone)]
pub struct ClassDef {
    /// Class name.
    pub name: String,
    /// Whether this class is abstract (cannot be instantiated directly).
    pub is_abstract: bool,
    /// Direct superclass names, in declaration order.
    pub superclass_names: Vec<String>,
    /// Attribute definitions.
    pub attributes: Vec<AttributeDef>,
    /// Association end definitions.
    pub associations: Vec<AssociationEndDef>,
    /// Declared constraints.
    pub constraints: Vec<ConstraintDef>,
    /// Declared semantic binding rules.
    pub binding_rules: Vec<BindingRule>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_abstract: false,
            superclass_names: Vec::new(),
            attributes: Vec::new(),
            associations: Vec::new(),
            constraints: Vec::new(),
            binding_rules: Vec::new(),
        }
    }

    /// Add a superclass by name.
    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass_names.push(superclass.into());
        self
    }

    /// Mark as abstract.
    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn attr(mut self, attr: AttributeDef) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn end(mut self, end: AssociationEndDef) -> Self {
        self.associations.push(end);
        self
    }

    pub fn constraint(mut self, constraint: ConstraintDef) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn rule(mut self, rule: BindingRule) -> Self {
        self.binding_rules.push(rule);
        self
    }

    /// Get an attribute declared directly on this class.
    pub fn get_attr(&self, name: &str) -> Option<&AttributeDef> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Get an association end declared directly on this class.
    pub fn get_end(&self, name: &str) -> Option<&AssociationEndDef> {
        self.associations.iter().find(|a| a.name == name)
    }
}
