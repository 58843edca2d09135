//! Containment helpers.
//!
//! Ownership is recorded in both directions (owner to relationship and
//! relationship to owned element, plus the inverse single-valued ends), so
//! that qualified names and identity paths can walk it either way.

use crate::NameResult;
use sema_core::{ElementRef, InstanceId};
use sema_graph::Store;

/// Which kind of import to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// Import every member of a namespace.
    Namespace,
    /// Import a single membership.
    Membership,
}

/// Make `relationship` an owned relationship of `owner`.
pub fn add_owned_relationship(
    store: &mut Store,
    owner: InstanceId,
    relationship: InstanceId,
) -> NameResult<()> {
    let registry = store.graph().registry_arc();
    let vocab = registry.vocabulary();
    store.link(owner, relationship, &vocab.owned_relationship)?;
    store.link(relationship, owner, &vocab.owning_related_element)?;
    Ok(())
}

/// Make `member` an owned member of `namespace` through a new owning
/// membership. Returns the membership.
pub fn add_owned_member(
    store: &mut Store,
    namespace: InstanceId,
    member: InstanceId,
) -> NameResult<InstanceId> {
    let registry = store.graph().registry_arc();
    let vocab = registry.vocabulary();
    let membership = store.create(&vocab.owning_membership_class)?;
    add_owned_relationship(store, namespace, membership)?;
    store.link(membership, member, &vocab.owned_member_element)?;
    store.link(member, membership, &vocab.owning_relationship)?;
    Ok(membership)
}

/// Make `feature` an owned member of `owning_type` and record it as the
/// feature's owning type. Returns the membership.
pub fn add_owned_feature(
    store: &mut Store,
    owning_type: InstanceId,
    feature: InstanceId,
) -> NameResult<InstanceId> {
    let registry = store.graph().registry_arc();
    let membership = add_owned_member(store, owning_type, feature)?;
    store.link(feature, owning_type, &registry.vocabulary().owning_type)?;
    Ok(membership)
}

/// Add a non-owning membership that makes `target` visible in `namespace`
/// under `name`. Returns the membership.
pub fn add_alias(
    store: &mut Store,
    namespace: InstanceId,
    name: &str,
    target: ElementRef,
) -> NameResult<InstanceId> {
    let registry = store.graph().registry_arc();
    let vocab = registry.vocabulary();
    let membership = store.create(&vocab.membership_class)?;
    store.set_property(membership, &vocab.member_name, name)?;
    store.link_ref(membership, target, &vocab.member_element)?;
    add_owned_relationship(store, namespace, membership)?;
    Ok(membership)
}

/// Add an import owned by `namespace`. Returns the import.
pub fn add_import(
    store: &mut Store,
    namespace: InstanceId,
    kind: ImportKind,
    target: ElementRef,
) -> NameResult<InstanceId> {
    let registry = store.graph().registry_arc();
    let vocab = registry.vocabulary();
    let (class, end) = match kind {
        ImportKind::Namespace => (&vocab.namespace_import_class, &vocab.imported_namespace),
        ImportKind::Membership => (&vocab.membership_import_class, &vocab.imported_membership),
    };
    let import = store.create(class)?;
    store.link_ref(import, target, end)?;
    add_owned_relationship(store, namespace, import)?;
    Ok(import)
}

/// Add an explicit (authored) edge of `relationship_class` from `specific`
/// to `general`, owned by `specific`. Returns the edge.
pub fn add_owned_edge(
    store: &mut Store,
    relationship_class: &str,
    specific: InstanceId,
    general: ElementRef,
) -> NameResult<InstanceId> {
    let registry = store.graph().registry_arc();
    let vocab = registry.vocabulary();
    let edge = store.create(relationship_class)?;
    store.link(edge, specific, &vocab.specific)?;
    store.link_ref(edge, general, &vocab.general)?;
    add_owned_relationship(store, specific, edge)?;
    Ok(edge)
}
