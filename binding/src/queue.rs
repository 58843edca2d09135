//! The pending queue and the store handler that feeds it.

use sema_core::{ElementRef, InstanceId};
use sema_graph::{Graph, LifecycleHandler, StoreEvent};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;
use tracing::trace;

/// Binding progress of one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingState {
    /// Never seen by the resolver.
    #[default]
    Unprocessed,
    /// Queued, or deferred because a rule target did not resolve.
    Pending,
    /// Every applicable rule was applied or skipped.
    Resolved,
}

/// FIFO of instances awaiting rule evaluation, each instance at most once.
#[derive(Debug, Default)]
pub struct PendingQueue {
    order: VecDeque<InstanceId>,
    queued: HashSet<InstanceId>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instance. Returns false if it is already queued.
    pub fn push(&mut self, id: InstanceId) -> bool {
        if !self.queued.insert(id) {
            return false;
        }
        self.order.push_back(id);
        true
    }

    /// Put an instance back at the head of the queue.
    pub fn push_front(&mut self, id: InstanceId) -> bool {
        if !self.queued.insert(id) {
            return false;
        }
        self.order.push_front(id);
        true
    }

    pub fn pop(&mut self) -> Option<InstanceId> {
        let id = self.order.pop_front()?;
        self.queued.remove(&id);
        Some(id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.queued.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Queued instances, head first.
    pub fn snapshot(&self) -> Vec<InstanceId> {
        self.order.iter().copied().collect()
    }
}

/// State shared between the resolver and its store handler.
#[derive(Debug, Default)]
pub(crate) struct Tracker {
    pub(crate) queue: PendingQueue,
    pub(crate) states: HashMap<InstanceId, BindingState>,
    pub(crate) enabled: bool,
    /// Instance whose own implied edges are being written; its link events
    /// must not re-queue it.
    pub(crate) writing: Option<InstanceId>,
}

impl Tracker {
    pub(crate) fn enqueue(&mut self, id: InstanceId) -> bool {
        self.states.insert(id, BindingState::Pending);
        self.queue.push(id)
    }
}

/// Lifecycle handler that queues instances for binding.
///
/// Created by [`crate::BindingResolver::handler`] and registered on the
/// store the resolver processes.
#[derive(Debug)]
pub struct BindingHandler {
    pub(crate) tracker: Rc<RefCell<Tracker>>,
}

impl BindingHandler {
    fn has_rules(graph: &Graph, class_name: &str) -> bool {
        graph
            .registry()
            .collect_inherited_binding_rules(class_name)
            .map(|rules| !rules.is_empty())
            .unwrap_or(false)
    }

    /// Features owned by `owner` whose owning type is `owner`.
    fn owned_features(graph: &Graph, owner: InstanceId) -> Vec<InstanceId> {
        let vocab = graph.registry().vocabulary();
        let owner_ref = graph.element_ref(owner);
        let local = |refs: Vec<ElementRef>| {
            refs.into_iter()
                .filter(|r| r.store == owner_ref.store)
                .map(|r| r.instance)
                .collect::<Vec<_>>()
        };
        let relationships = local(graph.navigate(owner, &vocab.owned_relationship).unwrap_or_default());
        relationships
            .into_iter()
            .flat_map(|rel| local(graph.navigate(rel, &vocab.owned_related_element).unwrap_or_default()))
            .filter(|&member| {
                graph.is_instance_of(member, &vocab.feature_class)
                    && graph
                        .navigate(member, &vocab.owning_type)
                        .is_ok_and(|owners| owners.contains(&owner_ref))
            })
            .collect()
    }
}

impl LifecycleHandler for BindingHandler {
    fn on_event(&mut self, graph: &Graph, event: &StoreEvent) {
        let mut tracker = self.tracker.borrow_mut();
        if !tracker.enabled {
            return;
        }

        match event {
            StoreEvent::InstanceCreated {
                instance,
                class_name,
            } => {
                if Self::has_rules(graph, class_name) {
                    tracker.enqueue(*instance);
                    trace!(instance = %instance, class = %class_name, "queued for binding");
                } else {
                    tracker.states.insert(*instance, BindingState::Resolved);
                }
            }
            StoreEvent::LinkCreated {
                source,
                association,
                ..
            } => {
                let requeue = tracker.writing != Some(*source)
                    && !tracker.queue.contains(*source)
                    && graph
                        .get(*source)
                        .is_some_and(|i| Self::has_rules(graph, &i.class_name));
                if requeue {
                    tracker.enqueue(*source);
                    trace!(instance = %source, association = %association, "re-queued after link");
                }
                // Owned features may carry rules conditioned on how their owner is typed.
                if *association == graph.registry().vocabulary().type_end {
                    for feature in Self::owned_features(graph, *source) {
                        if tracker.writing != Some(feature) && tracker.enqueue(feature) {
                            trace!(instance = %feature, owner = %source, "re-queued after owner typed");
                        }
                    }
                }
            }
            StoreEvent::PropertySet { .. } => {}
        }
    }
}
