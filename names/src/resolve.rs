//! Global name resolution.

use crate::{local_name, split_qualified_name};
use sema_core::ElementRef;
use sema_graph::{Graph, GraphView};
use tracing::debug;

/// Root namespaces of one graph (namespaces without an owning
/// relationship), in creation order.
pub fn root_namespaces(graph: &Graph) -> Vec<ElementRef> {
    let vocab = graph.registry().vocabulary();
    graph
        .instances_of(&vocab.namespace_class)
        .into_iter()
        .filter(|&id| {
            graph
                .get(id)
                .map(|i| i.slot(&vocab.owning_relationship).is_empty())
                .unwrap_or(false)
        })
        .map(|id| graph.element_ref(id))
        .collect()
}

/// Resolve a qualified name against every visible graph.
///
/// The first segment is looked up among the members of root namespaces,
/// graph by graph in view order; the remaining segments are member lookups.
/// The first candidate whose full path resolves wins.
pub fn resolve_global<V: GraphView + ?Sized>(view: &V, name: &str) -> Option<ElementRef> {
    let segments = match split_qualified_name(name) {
        Ok(segments) => segments,
        Err(e) => {
            debug!(error = %e, "unresolvable name");
            return None;
        }
    };
    let (first, rest) = segments.split_first()?;

    for graph in view.graphs() {
        for root in root_namespaces(graph) {
            let Some(mut current) = lookup_member(view, root, first) else {
                continue;
            };
            let mut complete = true;
            for segment in rest {
                match lookup_member(view, current, segment) {
                    Some(next) => current = next,
                    None => {
                        complete = false;
                        break;
                    }
                }
            }
            if complete {
                return Some(current);
            }
        }
    }
    None
}

/// Find a member of a namespace by name.
///
/// Owned and alias memberships are searched first, then imports. Imports
/// are not followed transitively: an imported namespace contributes only
/// its own memberships.
pub fn lookup_member<V: GraphView + ?Sized>(view: &V, namespace: ElementRef, name: &str) -> Option<ElementRef> {
    let vocab = view.registry().vocabulary();
    if let Some(found) = lookup_own_member(view, namespace, name) {
        return Some(found);
    }

    for relationship in view.links_or_empty(namespace, &vocab.owned_relationship) {
        if view.is_a(relationship, &vocab.namespace_import_class) {
            for imported in view.links_or_empty(relationship, &vocab.imported_namespace) {
                if let Some(found) = lookup_own_member(view, imported, name) {
                    return Some(found);
                }
            }
        } else if view.is_a(relationship, &vocab.membership_import_class) {
            for membership in view.links_or_empty(relationship, &vocab.imported_membership) {
                if membership_matches(view, membership, name) {
                    if let Some(found) = view.first_link(membership, &vocab.member_element) {
                        return Some(found);
                    }
                }
            }
        }
    }
    None
}

fn lookup_own_member<V: GraphView + ?Sized>(view: &V, namespace: ElementRef, name: &str) -> Option<ElementRef> {
    let vocab = view.registry().vocabulary();
    view.links_or_empty(namespace, &vocab.owned_relationship)
        .into_iter()
        .filter(|&rel| view.is_a(rel, &vocab.membership_class))
        .find(|&membership| membership_matches(view, membership, name))
        .and_then(|membership| view.first_link(membership, &vocab.member_element))
}

/// An alias membership matches on its member name; any other membership
/// matches on the member's declared name or short name.
fn membership_matches<V: GraphView + ?Sized>(view: &V, membership: ElementRef, name: &str) -> bool {
    let vocab = view.registry().vocabulary();
    if let Some(alias) = view.property(membership, &vocab.member_name).and_then(|v| v.as_str()) {
        return alias == name;
    }
    let Some(member) = view.first_link(membership, &vocab.member_element) else {
        return false;
    };
    local_name(view, member).as_deref() == Some(name)
        || view
            .property(member, &vocab.declared_short_name)
            .and_then(|v| v.as_str())
            == Some(name)
}
