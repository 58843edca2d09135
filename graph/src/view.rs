//! Read access across store boundaries.

use crate::{Graph, Instance, Store};
use sema_core::{ElementRef, GraphError, GraphResult, StoreId, Value};
use sema_registry::Registry;

/// Read-only access to every graph an element reference may point into.
///
/// A model store sees its own graph; a model with mounted libraries also
/// sees the mounts. Graphs are returned in resolution order: the local graph
/// first, then mounts by descending priority.
pub trait GraphView {
    /// The registry shared by the visible graphs.
    fn registry(&self) -> &Registry;

    /// Graphs visible through this view, in resolution order.
    fn graphs(&self) -> Vec<&Graph>;

    /// Look up one graph by store ID.
    fn graph(&self, store: StoreId) -> Option<&Graph> {
        self.graphs().into_iter().find(|g| g.store_id() == store)
    }

    fn instance(&self, element: ElementRef) -> Option<&Instance> {
        self.graph(element.store)?.get(element.instance)
    }

    fn class_name(&self, element: ElementRef) -> Option<&str> {
        self.instance(element).map(|i| i.class_name.as_str())
    }

    fn property(&self, element: ElementRef, name: &str) -> Option<&Value> {
        self.instance(element)?.get_attr(name)
    }

    /// Check whether an element is an instance of `class` or a descendant.
    fn is_a(&self, element: ElementRef, class: &str) -> bool {
        self.class_name(element)
            .map(|name| self.registry().is_a(name, class))
            .unwrap_or(false)
    }

    /// Navigate an association end of any visible element.
    fn links(&self, element: ElementRef, assoc: &str) -> GraphResult<Vec<ElementRef>> {
        self.graph(element.store)
            .ok_or(GraphError::InstanceNotFound(element.instance))?
            .navigate(element.instance, assoc)
    }

    /// Navigate, treating an unknown end or element as empty.
    fn links_or_empty(&self, element: ElementRef, assoc: &str) -> Vec<ElementRef> {
        self.links(element, assoc).unwrap_or_default()
    }

    /// The first navigated value, if any.
    fn first_link(&self, element: ElementRef, assoc: &str) -> Option<ElementRef> {
        self.links_or_empty(element, assoc).into_iter().next()
    }
}

impl GraphView for Graph {
    fn registry(&self) -> &Registry {
        Graph::registry(self)
    }

    fn graphs(&self) -> Vec<&Graph> {
        vec![self]
    }

    fn graph(&self, store: StoreId) -> Option<&Graph> {
        (self.store_id() == store).then_some(self)
    }
}

impl GraphView for Store {
    fn registry(&self) -> &Registry {
        self.graph().registry()
    }

    fn graphs(&self) -> Vec<&Graph> {
        vec![self.graph()]
    }

    fn graph(&self, store: StoreId) -> Option<&Graph> {
        (self.store_id() == store).then(|| self.graph())
    }
}
