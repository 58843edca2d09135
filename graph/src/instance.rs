//! Instance structure.

use sema_core::{Attributes, ElementId, ElementRef, InstanceId, Value};
use std::collections::HashMap;

/// A live element of the model graph.
///
/// Attributes hold scalar values; link slots hold ordered element references
/// keyed by the storage slot of the association end.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Arena key within the owning store.
    pub id: InstanceId,
    /// Concrete class of this instance.
    pub class_name: String,
    /// External identifier, once assigned.
    pub element_id: Option<ElementId>,
    attributes: Attributes,
    links: HashMap<String, Vec<ElementRef>>,
}

impl Instance {
    pub(crate) fn new(id: InstanceId, class_name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id,
            class_name: class_name.into(),
            element_id: None,
            attributes,
            links: HashMap::new(),
        }
    }

    /// Get an attribute value by name.
    pub fn get_attr(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// All attribute values.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Values stored directly in a slot, without aliasing.
    pub fn slot(&self, name: &str) -> &[ElementRef] {
        self.links.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn set_attr(&mut self, name: String, value: Value) {
        self.attributes.insert(name, value);
    }

    pub(crate) fn slot_mut(&mut self, name: &str) -> &mut Vec<ElementRef> {
        self.links.entry(name.to_string()).or_default()
    }
}
