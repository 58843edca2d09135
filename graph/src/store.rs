//! The mutable store wrapping a graph.

use crate::{Graph, Instance, LifecycleHandler, StoreEvent};
use sema_core::{ElementId, ElementRef, GraphResult, InstanceId, StoreId, Value};
use sema_registry::Registry;
use std::sync::Arc;
use tracing::trace;

/// A model store: a graph plus the observers of its mutations.
///
/// Every successful `create`, `link` and `set_property` emits one
/// [`StoreEvent`] to each registered handler, in registration order.
pub struct Store {
    graph: Graph,
    handlers: Vec<Box<dyn LifecycleHandler>>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("graph", &self.graph)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl Store {
    /// Create an empty store over a sealed registry.
    pub fn new(registry: Arc<Registry>) -> GraphResult<Self> {
        Ok(Self {
            graph: Graph::new(registry)?,
            handlers: Vec::new(),
        })
    }

    /// Read access to the underlying graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn store_id(&self) -> StoreId {
        self.graph.store_id()
    }

    pub fn registry(&self) -> &Registry {
        self.graph.registry()
    }

    /// Register an observer for subsequent mutations.
    pub fn register_lifecycle_handler(&mut self, handler: impl LifecycleHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Stop emitting events and turn the graph into a shareable snapshot.
    pub fn freeze(self) -> Arc<Graph> {
        Arc::new(self.graph)
    }

    // ==================== Mutations ====================

    /// Create an instance of a concrete class, with attribute defaults
    /// applied.
    pub fn create(&mut self, class_name: &str) -> GraphResult<InstanceId> {
        let id = self.graph.create_instance(class_name)?;
        self.emit(StoreEvent::InstanceCreated {
            instance: id,
            class_name: class_name.to_string(),
        });
        Ok(id)
    }

    /// Set an attribute declared on the instance's class or an ancestor.
    pub fn set_property(&mut self, id: InstanceId, name: &str, value: impl Into<Value>) -> GraphResult<()> {
        self.graph.set_attr(id, name, value.into())?;
        self.emit(StoreEvent::PropertySet {
            instance: id,
            name: name.to_string(),
        });
        Ok(())
    }

    /// Link a local target into an association end of `source`.
    pub fn link(&mut self, source: InstanceId, target: InstanceId, assoc: &str) -> GraphResult<()> {
        let target = self.graph.element_ref(target);
        self.link_ref(source, target, assoc)
    }

    /// Link any element, possibly in a mounted library, into an association
    /// end of `source`.
    pub fn link_ref(&mut self, source: InstanceId, target: ElementRef, assoc: &str) -> GraphResult<()> {
        self.graph.add_link(source, target, assoc)?;
        self.emit(StoreEvent::LinkCreated {
            source,
            target,
            association: assoc.to_string(),
        });
        Ok(())
    }

    /// Stamp an external identifier. Not an observable mutation.
    pub fn set_element_id(&mut self, id: InstanceId, element_id: ElementId) -> GraphResult<()> {
        self.graph.set_element_id(id, element_id)
    }

    // ==================== Reads ====================

    pub fn get(&self, id: InstanceId) -> Option<&Instance> {
        self.graph.get(id)
    }

    pub fn get_property(&self, id: InstanceId, name: &str) -> Option<&Value> {
        self.graph.get_property(id, name)
    }

    pub fn navigate(&self, id: InstanceId, assoc: &str) -> GraphResult<Vec<ElementRef>> {
        self.graph.navigate(id, assoc)
    }

    pub fn navigate_one(&self, id: InstanceId, assoc: &str) -> GraphResult<ElementRef> {
        self.graph.navigate_one(id, assoc)
    }

    pub fn all_instances(&self) -> impl Iterator<Item = &Instance> {
        self.graph.all_instances()
    }

    pub fn instances_by_class(&self, name: &str) -> Vec<InstanceId> {
        self.graph.instances_by_class(name)
    }

    pub fn instances_of(&self, name: &str) -> Vec<InstanceId> {
        self.graph.instances_of(name)
    }

    pub fn element_ref(&self, id: InstanceId) -> ElementRef {
        self.graph.element_ref(id)
    }

    fn emit(&mut self, event: StoreEvent) {
        trace!(store = %self.graph.store_id(), ?event, "store event");
        for handler in &mut self.handlers {
            handler.on_event(&self.graph, &event);
        }
    }
}
