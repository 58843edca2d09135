//! Core instance storage.

use crate::Instance;
use sema_core::{
    Attributes, ElementId, ElementRef, GraphError, GraphResult, InstanceId, StoreId, Value,
};
use sema_registry::{AliasTable, Registry};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// The in-memory instance arena of one store.
///
/// A `Graph` is read-only from the outside; mutation goes through
/// [`crate::Store`], which validates against the registry and emits events.
/// A frozen graph is shared as `Arc<Graph>` when mounted as a library.
#[derive(Debug)]
pub struct Graph {
    store_id: StoreId,
    registry: Arc<Registry>,
    /// Instance storage, indexed by `InstanceId - 1`.
    instances: Vec<Instance>,
    /// Concrete class name -> instances, in creation order.
    class_index: HashMap<String, Vec<InstanceId>>,
}

impl Graph {
    /// Create an empty graph over a sealed registry.
    pub fn new(registry: Arc<Registry>) -> GraphResult<Self> {
        if !registry.is_sealed() {
            return Err(GraphError::RegistryNotSealed);
        }
        Ok(Self {
            store_id: StoreId::fresh(),
            registry,
            instances: Vec::new(),
            class_index: HashMap::new(),
        })
    }

    /// Identifier of this graph among all stores and mounts.
    pub fn store_id(&self) -> StoreId {
        self.store_id
    }

    /// The registry this graph is validated against.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Shared handle to the registry.
    pub fn registry_arc(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// A cross-store reference to a local instance.
    pub fn element_ref(&self, id: InstanceId) -> ElementRef {
        ElementRef::new(self.store_id, id)
    }

    // ==================== Reads ====================

    /// Get an instance by ID.
    pub fn get(&self, id: InstanceId) -> Option<&Instance> {
        let index = usize::try_from(id.raw()).ok()?.checked_sub(1)?;
        self.instances.get(index)
    }

    /// Check if an instance exists.
    pub fn contains(&self, id: InstanceId) -> bool {
        self.get(id).is_some()
    }

    /// Get an attribute value. Returns `None` for unknown instances and
    /// unset attributes.
    pub fn get_property(&self, id: InstanceId, name: &str) -> Option<&Value> {
        self.get(id)?.get_attr(name)
    }

    /// Navigate an association end.
    ///
    /// Yields the values stored under the end itself followed by those of
    /// every end that subsets or redefines it, in declaration order, each
    /// reference once.
    pub fn navigate(&self, id: InstanceId, assoc: &str) -> GraphResult<Vec<ElementRef>> {
        let instance = self.get(id).ok_or(GraphError::InstanceNotFound(id))?;
        let table = self.aliases_for(instance)?;
        if table.end(assoc).is_none() {
            return Err(GraphError::UnknownAssociation {
                class: instance.class_name.clone(),
                assoc: assoc.to_string(),
            });
        }

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for slot in table.navigation_slots(assoc) {
            for &target in instance.slot(slot) {
                if seen.insert(target) {
                    out.push(target);
                }
            }
        }
        Ok(out)
    }

    /// Navigate an end the caller expects to hold exactly one value.
    pub fn navigate_one(&self, id: InstanceId, assoc: &str) -> GraphResult<ElementRef> {
        self.navigate(id, assoc)?
            .into_iter()
            .next()
            .ok_or_else(|| GraphError::MissingRequired {
                instance: id,
                assoc: assoc.to_string(),
            })
    }

    /// All instances in creation order.
    pub fn all_instances(&self) -> impl Iterator<Item = &Instance> {
        self.instances.iter()
    }

    /// Instances whose concrete class is `name`.
    pub fn instances_by_class(&self, name: &str) -> Vec<InstanceId> {
        self.class_index.get(name).cloned().unwrap_or_default()
    }

    /// Instances of `name` or any of its descendants, in creation order.
    pub fn instances_of(&self, name: &str) -> Vec<InstanceId> {
        self.instances
            .iter()
            .filter(|i| self.registry.is_a(&i.class_name, name))
            .map(|i| i.id)
            .collect()
    }

    /// Check whether an instance's class is `ancestor` or inherits from it.
    pub fn is_instance_of(&self, id: InstanceId, ancestor: &str) -> bool {
        self.get(id)
            .map(|i| self.registry.is_a(&i.class_name, ancestor))
            .unwrap_or(false)
    }

    /// Find the instance carrying an external identifier.
    pub fn find_by_element_id(&self, element_id: ElementId) -> Option<InstanceId> {
        self.instances
            .iter()
            .find(|i| i.element_id == Some(element_id))
            .map(|i| i.id)
    }

    // ==================== Mutations ====================

    pub(crate) fn create_instance(&mut self, class_name: &str) -> GraphResult<InstanceId> {
        let class = self
            .registry
            .get_class(class_name)
            .ok_or_else(|| GraphError::UnknownClass(class_name.to_string()))?;
        if class.is_abstract {
            return Err(GraphError::AbstractClass(class_name.to_string()));
        }

        let attributes: Attributes = self
            .registry
            .all_attributes(class_name)
            .into_iter()
            .filter_map(|attr| attr.default.clone().map(|v| (attr.name.clone(), v)))
            .collect();

        let id = InstanceId::new(self.instances.len() as u64 + 1);
        self.instances.push(Instance::new(id, class_name, attributes));
        self.class_index
            .entry(class_name.to_string())
            .or_default()
            .push(id);
        Ok(id)
    }

    pub(crate) fn set_attr(&mut self, id: InstanceId, name: &str, value: Value) -> GraphResult<()> {
        let instance = self.get(id).ok_or(GraphError::InstanceNotFound(id))?;
        let attr = self
            .registry
            .find_attribute(&instance.class_name, name)
            .ok_or_else(|| GraphError::UnknownAttribute {
                class: instance.class_name.clone(),
                attr: name.to_string(),
            })?;
        if !value.conforms_to(&attr.type_name) {
            return Err(GraphError::TypeMismatch {
                attr: name.to_string(),
                expected: attr.type_name.clone(),
                actual: value.type_name().to_string(),
            });
        }

        self.get_mut(id)?.set_attr(name.to_string(), value);
        Ok(())
    }

    /// Store `target` under the canonical slot of `assoc`.
    ///
    /// Single-valued ends are overwritten; other bounded ends reject values
    /// past their upper bound; unbounded ends append. References into other
    /// stores are accepted as-is.
    pub(crate) fn add_link(
        &mut self,
        source: InstanceId,
        target: ElementRef,
        assoc: &str,
    ) -> GraphResult<()> {
        if target.is_in(self.store_id) && !self.contains(target.instance) {
            return Err(GraphError::TargetNotFound(target));
        }

        let instance = self.get(source).ok_or(GraphError::InstanceNotFound(source))?;
        let table = self.aliases_for(instance)?;
        if table.end(assoc).is_none() {
            return Err(GraphError::UnknownAssociation {
                class: instance.class_name.clone(),
                assoc: assoc.to_string(),
            });
        }
        let slot = table.storage_slot(assoc).to_string();
        let upper = table.end(&slot).and_then(|end| end.upper);

        let values = self.get_mut(source)?.slot_mut(&slot);
        match upper {
            Some(1) => {
                values.clear();
                values.push(target);
            }
            Some(upper) if values.len() >= upper as usize => {
                return Err(GraphError::MultiplicityExceeded {
                    instance: source,
                    assoc: slot,
                    upper,
                });
            }
            _ => values.push(target),
        }
        Ok(())
    }

    pub(crate) fn set_element_id(&mut self, id: InstanceId, element_id: ElementId) -> GraphResult<()> {
        self.get_mut(id)?.element_id = Some(element_id);
        Ok(())
    }

    fn get_mut(&mut self, id: InstanceId) -> GraphResult<&mut Instance> {
        usize::try_from(id.raw())
            .ok()
            .and_then(|raw| raw.checked_sub(1))
            .and_then(|index| self.instances.get_mut(index))
            .ok_or(GraphError::InstanceNotFound(id))
    }

    fn aliases_for(&self, instance: &Instance) -> GraphResult<&AliasTable> {
        self.registry
            .aliases(&instance.class_name)
            .ok_or_else(|| GraphError::UnknownClass(instance.class_name.clone()))
    }
}
