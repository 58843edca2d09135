//! The binding resolver.

use crate::queue::Tracker;
use crate::{
    BindingError, BindingHandler, BindingResult, BindingState, ConditionEvaluator, KernelConfig,
};
use sema_core::{ElementRef, GraphError, InstanceId, RuleId};
use sema_graph::{GraphView, Store};
use sema_names::{resolve_global, ModelView, MountRegistry};
use sema_registry::{BindingKind, Vocabulary};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Statistics from one `process_all_pending` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessStats {
    /// Instances taken off the queue.
    pub instances_processed: usize,
    /// Rule evaluations performed.
    pub steps: usize,
    /// Implied edges materialized.
    pub edges_created: usize,
    /// Rules whose condition was false.
    pub skipped_condition: usize,
    /// Rules suppressed by an explicit edge of the same family.
    pub skipped_redundant: usize,
    /// Rules whose target is the instance itself.
    pub skipped_self: usize,
    /// Rules whose kind does not apply to the instance's class.
    pub skipped_unsupported: usize,
    /// Instances left pending for a later call.
    pub deferred: usize,
}

/// An edge to create once evaluation of an instance is complete.
#[derive(Debug)]
struct Planned {
    rule: RuleId,
    edge_class: String,
    general: ElementRef,
}

/// Result of evaluating an instance's rules.
struct Plan {
    edges: Vec<Planned>,
    deferred: bool,
    /// Index of the first rule left unevaluated by the step limit.
    stopped_at: Option<usize>,
}

/// Where an instance interrupted by the step limit picks up again.
#[derive(Debug, Clone, Copy)]
struct Resume {
    next_rule: usize,
    deferred: bool,
}

enum Outcome {
    Resolved,
    Deferred,
}

/// Derives implied edges for one store.
///
/// Register [`BindingResolver::handler`] on the store, then call
/// [`BindingResolver::process_all_pending`] whenever the referenced
/// libraries may have become available.
#[derive(Debug)]
pub struct BindingResolver {
    config: KernelConfig,
    tracker: Rc<RefCell<Tracker>>,
    /// (instance, rule) pairs that must not be evaluated again.
    settled: HashSet<(InstanceId, RuleId)>,
    resume: HashMap<InstanceId, Resume>,
}

impl BindingResolver {
    pub fn new(config: KernelConfig) -> Self {
        let tracker = Tracker {
            enabled: config.process_implied_relationships,
            ..Tracker::default()
        };
        Self {
            config,
            tracker: Rc::new(RefCell::new(tracker)),
            settled: HashSet::new(),
            resume: HashMap::new(),
        }
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// A handler feeding this resolver's queue.
    pub fn handler(&self) -> BindingHandler {
        BindingHandler {
            tracker: Rc::clone(&self.tracker),
        }
    }

    /// Register this resolver's handler on a store.
    pub fn attach(&self, store: &mut Store) {
        store.register_lifecycle_handler(self.handler());
    }

    /// Binding state of an instance.
    pub fn state(&self, id: InstanceId) -> BindingState {
        self.tracker
            .borrow()
            .states
            .get(&id)
            .copied()
            .unwrap_or_default()
    }

    /// Instances currently queued, head first.
    pub fn pending(&self) -> Vec<InstanceId> {
        self.tracker.borrow().queue.snapshot()
    }

    pub fn pending_count(&self) -> usize {
        self.tracker.borrow().queue.len()
    }

    /// Drain the pending queue.
    ///
    /// Instances are processed in FIFO order, including ones queued by this
    /// call's own mutations. Instances with an unresolved rule target are
    /// queued again for the next call. Fails when more than
    /// `max_steps` rule evaluations are needed; unprocessed work stays queued.
    pub fn process_all_pending(
        &mut self,
        store: &mut Store,
        mounts: &MountRegistry,
    ) -> BindingResult<ProcessStats> {
        let mut stats = ProcessStats::default();
        if !self.config.process_implied_relationships {
            return Ok(stats);
        }

        let mut deferred = Vec::new();
        loop {
            let next = self.tracker.borrow_mut().queue.pop();
            let Some(id) = next else {
                break;
            };
            stats.instances_processed += 1;

            match self.process_instance(store, mounts, id, &mut stats) {
                Ok(Outcome::Resolved) => {
                    self.tracker
                        .borrow_mut()
                        .states
                        .insert(id, BindingState::Resolved);
                }
                Ok(Outcome::Deferred) => {
                    self.tracker
                        .borrow_mut()
                        .states
                        .insert(id, BindingState::Pending);
                    deferred.push(id);
                }
                Err(e) => {
                    let mut tracker = self.tracker.borrow_mut();
                    tracker.queue.push_front(id);
                    for id in deferred {
                        tracker.enqueue(id);
                    }
                    if let BindingError::StepLimitExceeded { limit, .. } = e {
                        let remaining = tracker.queue.len();
                        warn!(limit, remaining, "binding step limit exceeded");
                        return Err(BindingError::step_limit_exceeded(limit, remaining));
                    }
                    return Err(e);
                }
            }
        }

        stats.deferred = deferred.len();
        {
            let mut tracker = self.tracker.borrow_mut();
            for id in deferred {
                tracker.enqueue(id);
            }
        }

        info!(
            processed = stats.instances_processed,
            created = stats.edges_created,
            deferred = stats.deferred,
            steps = stats.steps,
            "pending bindings processed"
        );
        Ok(stats)
    }

    fn process_instance(
        &mut self,
        store: &mut Store,
        mounts: &MountRegistry,
        id: InstanceId,
        stats: &mut ProcessStats,
    ) -> BindingResult<Outcome> {
        let plan = self.plan(store, mounts, id, stats)?;

        for edge in &plan.edges {
            self.materialize(store, id, edge)?;
            self.settled.insert((id, edge.rule));
            stats.edges_created += 1;
        }

        if let Some(next_rule) = plan.stopped_at {
            self.resume.insert(
                id,
                Resume {
                    next_rule,
                    deferred: plan.deferred,
                },
            );
            return Err(BindingError::step_limit_exceeded(self.config.max_steps, 0));
        }

        Ok(if plan.deferred {
            Outcome::Deferred
        } else {
            Outcome::Resolved
        })
    }

    /// Evaluate every unsettled rule of an instance without mutating the
    /// store. Evaluation continues from the rule where the step limit last
    /// interrupted it, and stops early when the limit is reached again.
    fn plan(
        &mut self,
        store: &Store,
        mounts: &MountRegistry,
        id: InstanceId,
        stats: &mut ProcessStats,
    ) -> BindingResult<Plan> {
        let view = ModelView::new(store.graph(), mounts);
        let registry = store.registry();
        let vocab = registry.vocabulary();
        let instance = store.get(id).ok_or(GraphError::InstanceNotFound(id))?;
        let element = store.element_ref(id);
        let evaluator = ConditionEvaluator::new(&view);

        let resume = self.resume.remove(&id);
        let start = resume.map_or(0, |r| r.next_rule);
        let mut planned = Vec::new();
        let mut deferred = resume.is_some_and(|r| r.deferred);

        let rules = registry.collect_inherited_binding_rules(&instance.class_name)?;
        for (index, bound) in rules.into_iter().enumerate().skip(start) {
            if self.settled.contains(&(id, bound.id)) {
                continue;
            }
            if stats.steps >= self.config.max_steps {
                debug!(instance = %id, next_rule = index, "step limit reached mid-instance");
                return Ok(Plan {
                    edges: planned,
                    deferred,
                    stopped_at: Some(index),
                });
            }
            stats.steps += 1;

            let rule = bound.rule;
            if !evaluator.evaluate(element, &rule.condition) {
                stats.skipped_condition += 1;
                continue;
            }

            let Some(general) = resolve_global(&view, &rule.target_concept_name) else {
                debug!(instance = %id, rule = %bound.id, target = %rule.target_concept_name, "target unresolved; deferring");
                deferred = true;
                continue;
            };

            if general == element {
                debug!(instance = %id, rule = %bound.id, "self edge skipped");
                stats.skipped_self += 1;
                self.settled.insert((id, bound.id));
                continue;
            }

            if has_explicit_edge(&view, vocab, element, family_class(vocab, rule.kind)) {
                debug!(instance = %id, rule = %bound.id, "explicit edge present; implied edge skipped");
                stats.skipped_redundant += 1;
                continue;
            }

            let Some(edge_class) = edge_class(&view, vocab, element, rule.kind) else {
                debug!(instance = %id, rule = %bound.id, kind = ?rule.kind, class = %instance.class_name, "rule kind not applicable");
                stats.skipped_unsupported += 1;
                self.settled.insert((id, bound.id));
                continue;
            };

            planned.push(Planned {
                rule: bound.id,
                edge_class: edge_class.to_string(),
                general,
            });
        }

        Ok(Plan {
            edges: planned,
            deferred,
            stopped_at: None,
        })
    }

    fn materialize(&self, store: &mut Store, id: InstanceId, edge: &Planned) -> BindingResult<()> {
        let registry = store.graph().registry_arc();
        let vocab = registry.vocabulary();

        let relationship = store.create(&edge.edge_class)?;
        store.set_property(relationship, &vocab.is_implied, true)?;
        store.link(relationship, id, &vocab.specific)?;
        store.link_ref(relationship, edge.general, &vocab.general)?;
        store.link(relationship, id, &vocab.owning_related_element)?;

        self.tracker.borrow_mut().writing = Some(id);
        let owned = store.link(id, relationship, &vocab.owned_relationship);
        self.tracker.borrow_mut().writing = None;
        owned?;

        debug!(
            instance = %id,
            rule = %edge.rule,
            edge = %relationship,
            class = %edge.edge_class,
            general = %edge.general,
            "implied edge created"
        );
        Ok(())
    }
}

fn family_class(vocab: &Vocabulary, kind: BindingKind) -> &str {
    match kind {
        BindingKind::Specializes => vocab.specialization_class.as_str(),
        BindingKind::Subsets => vocab.subsetting_class.as_str(),
    }
}

/// The concrete relationship class for a rule kind, if the kind applies to
/// the element.
fn edge_class<'a, V: GraphView + ?Sized>(
    view: &V,
    vocab: &'a Vocabulary,
    element: ElementRef,
    kind: BindingKind,
) -> Option<&'a str> {
    match kind {
        BindingKind::Specializes if view.is_a(element, &vocab.classifier_class) => {
            Some(vocab.subclassification_class.as_str())
        }
        BindingKind::Subsets if view.is_a(element, &vocab.feature_class) => {
            Some(vocab.subsetting_class.as_str())
        }
        _ => None,
    }
}

/// Whether the element owns a non-implied edge of the family with itself
/// as the specific end. Only the element's own edges are inspected.
fn has_explicit_edge<V: GraphView + ?Sized>(
    view: &V,
    vocab: &Vocabulary,
    element: ElementRef,
    family: &str,
) -> bool {
    view.links_or_empty(element, &vocab.owned_relationship)
        .into_iter()
        .filter(|&rel| view.is_a(rel, family))
        .filter(|&rel| {
            view.property(rel, &vocab.is_implied)
                .and_then(|v| v.as_bool())
                != Some(true)
        })
        .any(|rel| view.links_or_empty(rel, &vocab.specific).contains(&element))
}
