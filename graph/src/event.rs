//! Lifecycle events emitted by the store.

use crate::Graph;
use sema_core::{ElementRef, InstanceId};

/// A mutation that has just been applied to a store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// A new instance was created.
    InstanceCreated {
        instance: InstanceId,
        class_name: String,
    },
    /// A value was linked into an association end.
    LinkCreated {
        source: InstanceId,
        target: ElementRef,
        /// The end name the caller linked through.
        association: String,
    },
    /// An attribute was set.
    PropertySet { instance: InstanceId, name: String },
}

/// Observer of store mutations.
///
/// Handlers are called synchronously after the mutation, in registration
/// order, with read access to the updated graph.
pub trait LifecycleHandler {
    fn on_event(&mut self, graph: &Graph, event: &StoreEvent);
}

impl<F> LifecycleHandler for F
where
    F: FnMut(&Graph, &StoreEvent),
{
    fn on_event(&mut self, graph: &Graph, event: &StoreEvent) {
        self(graph, event)
    }
}
