//! Deterministic identity assignment.
//!
//! Each named top-level member of a root namespace gets
//! `v5(NAMESPACE_URL, base_url + qualified name)`. Every element and
//! relationship contained in it gets `v5(member id, path)`, where the path
//! is the element's qualified name when it has one and is otherwise built
//! from its position under its owner:
//!
//! - an owning membership of a named member: `<member qn>/owningMembership`
//! - an owned relationship: `<owner path>/<1-based index among the owner's
//!   owned relationships>`
//! - any other owned element: `<owning relationship path>/<1-based index
//!   among its owned related elements>`

use crate::{IdentityConfig, IdentityError, IdentityResult};
use sema_core::{ElementId, ElementRef, InstanceId};
use sema_graph::{Graph, GraphView, Store};
use sema_names::{qualified_name_of, root_namespaces};
use sema_registry::Vocabulary;
use std::collections::HashSet;
use tracing::{debug, info};
use uuid::Uuid;

/// Computes and stamps stable identifiers for standard content.
#[derive(Debug, Clone, Default)]
pub struct IdentityAssigner {
    config: IdentityConfig,
}

impl IdentityAssigner {
    pub fn new(config: IdentityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IdentityConfig {
        &self.config
    }

    /// Compute identifiers for all contained content, in containment order.
    /// The graph is not modified.
    pub fn compute(&self, graph: &Graph) -> IdentityResult<Vec<(InstanceId, ElementId)>> {
        let mut walk = Walk {
            graph,
            vocab: graph.registry().vocabulary(),
            namespace: Uuid::nil(),
            visited: HashSet::new(),
            out: Vec::new(),
        };

        for root in root_namespaces(graph) {
            for membership in walk.local_links(root, &walk.vocab.owned_relationship) {
                if !graph.is_a(membership, &walk.vocab.owning_membership_class) {
                    continue;
                }
                let Some(member) = walk.local_first(membership, &walk.vocab.member_element) else {
                    continue;
                };
                // Only members with a declared name start a namespace.
                if graph.get_property(member.instance, &walk.vocab.declared_name).is_none() {
                    continue;
                }
                let Some(qualified_name) = qualified_name_of(graph, member) else {
                    continue;
                };

                let url = format!("{}{}", self.config.base_url, qualified_name);
                walk.namespace = Uuid::new_v5(&Uuid::NAMESPACE_URL, url.as_bytes());
                debug!(member = %qualified_name, namespace = %walk.namespace, "top-level namespace");

                walk.record(member, walk.namespace)?;
                let membership_path = format!("{qualified_name}/owningMembership");
                walk.stamp(membership, &membership_path)?;
                walk.element(member, &qualified_name)?;
            }
        }

        Ok(walk.out)
    }

    /// Compute and stamp identifiers. Returns the number of elements stamped.
    pub fn assign(&self, store: &mut Store) -> IdentityResult<usize> {
        let ids = self.compute(store.graph())?;
        for &(id, element_id) in &ids {
            store.set_element_id(id, element_id)?;
        }
        info!(count = ids.len(), base_url = %self.config.base_url, "standard identifiers assigned");
        Ok(ids.len())
    }
}

/// Stamp random identifiers on every element that has none. Returns the
/// number of elements stamped.
pub fn assign_session_ids(store: &mut Store) -> IdentityResult<usize> {
    let missing: Vec<InstanceId> = store
        .all_instances()
        .filter(|i| i.element_id.is_none())
        .map(|i| i.id)
        .collect();
    for &id in &missing {
        store.set_element_id(id, Uuid::new_v4())?;
    }
    debug!(count = missing.len(), "session identifiers assigned");
    Ok(missing.len())
}

struct Walk<'g> {
    graph: &'g Graph,
    vocab: &'g Vocabulary,
    /// Identifier of the top-level member being walked.
    namespace: Uuid,
    visited: HashSet<InstanceId>,
    out: Vec<(InstanceId, ElementId)>,
}

impl Walk<'_> {
    fn element(&mut self, element: ElementRef, path: &str) -> IdentityResult<()> {
        let owned = self.local_links(element, &self.vocab.owned_relationship);
        for (index, relationship) in owned.into_iter().enumerate() {
            let relationship_path = self
                .own_path(relationship)
                .unwrap_or_else(|| format!("{path}/{}", index + 1));
            self.stamp(relationship, &relationship_path)?;
            self.relationship(relationship, &relationship_path)?;
        }
        Ok(())
    }

    fn relationship(&mut self, relationship: ElementRef, path: &str) -> IdentityResult<()> {
        let owned = self.local_links(relationship, &self.vocab.owned_related_element);
        for (index, element) in owned.into_iter().enumerate() {
            let element_path = qualified_name_of(self.graph, element)
                .unwrap_or_else(|| format!("{path}/{}", index + 1));
            self.stamp(element, &element_path)?;
            self.element(element, &element_path)?;
        }
        Ok(())
    }

    /// A relationship's path when it does not depend on its position.
    fn own_path(&self, relationship: ElementRef) -> Option<String> {
        if let Some(name) = qualified_name_of(self.graph, relationship) {
            return Some(name);
        }
        if !self.graph.is_a(relationship, &self.vocab.owning_membership_class) {
            return None;
        }
        let member = self.local_first(relationship, &self.vocab.member_element)?;
        qualified_name_of(self.graph, member).map(|name| format!("{name}/owningMembership"))
    }

    fn stamp(&mut self, element: ElementRef, path: &str) -> IdentityResult<()> {
        let id = Uuid::new_v5(&self.namespace, path.as_bytes());
        self.record(element, id)
    }

    fn record(&mut self, element: ElementRef, id: ElementId) -> IdentityResult<()> {
        if !self.visited.insert(element.instance) {
            return Err(IdentityError::ContainmentCycle(element.instance));
        }
        self.out.push((element.instance, id));
        Ok(())
    }

    fn local_links(&self, element: ElementRef, assoc: &str) -> Vec<ElementRef> {
        let store = self.graph.store_id();
        self.graph
            .links_or_empty(element, assoc)
            .into_iter()
            .filter(|r| r.is_in(store))
            .collect()
    }

    fn local_first(&self, element: ElementRef, assoc: &str) -> Option<ElementRef> {
        self.local_links(element, assoc).into_iter().next()
    }
}
