//! Helpers for checking the edges an element owns.

use pretty_assertions::assert_eq;
use sema_core::{InstanceId, Value};
use sema_graph::GraphView;
use sema_session::Model;

/// A specialization-family edge owned by an element.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct OwnedEdge {
    pub class_name: String,
    /// Qualified name of the general end, or its reference when unnamed.
    pub general: String,
    pub implied: bool,
}

/// Specialization-family edges owned by `id`, in ownership order.
pub fn owned_edges(model: &Model, id: InstanceId) -> Vec<OwnedEdge> {
    let view = model.view();
    let vocab = model.store().registry().vocabulary();
    view.links_or_empty(model.element_ref(id), &vocab.owned_relationship)
        .into_iter()
        .filter(|&rel| view.is_a(rel, &vocab.specialization_class))
        .map(|rel| {
            let general = view
                .first_link(rel, &vocab.general)
                .map(|g| model.qualified_name_of(g).unwrap_or_else(|| g.to_string()))
                .unwrap_or_default();
            OwnedEdge {
                class_name: view.class_name(rel).unwrap_or_default().to_string(),
                general,
                implied: view.property(rel, &vocab.is_implied) == Some(&Value::Bool(true)),
            }
        })
        .collect()
}

/// Qualified names of the generals of `id`'s implied edges, sorted.
pub fn implied_generals(model: &Model, id: InstanceId) -> Vec<String> {
    let mut generals: Vec<String> = owned_edges(model, id)
        .into_iter()
        .filter(|e| e.implied)
        .map(|e| e.general)
        .collect();
    generals.sort();
    generals
}

/// Assert the exact set of implied generals of `id`.
#[track_caller]
pub fn assert_implied(model: &Model, id: InstanceId, expected: &[&str]) {
    let mut expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(implied_generals(model, id), expected);
}

/// Assert that `id` owns no implied edges.
#[track_caller]
pub fn assert_no_implied(model: &Model, id: InstanceId) {
    assert_implied(model, id, &[]);
}
