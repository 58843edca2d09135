//! Mounted library graphs.

use sema_core::StoreId;
use sema_graph::{Graph, GraphView};
use sema_registry::Registry;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

/// A frozen graph contributed to name resolution.
#[derive(Debug, Clone)]
pub struct Mount {
    pub id: String,
    pub graph: Arc<Graph>,
    /// Higher priorities are consulted first.
    pub priority: i32,
    /// Mounted by the runtime rather than requested by the model.
    pub is_implicit: bool,
}

/// Id-keyed registry of mounts.
///
/// Append-only: the first registration of an id wins and later ones are
/// ignored. Share it between models with `Arc<MountRegistry>`.
#[derive(Debug, Default)]
pub struct MountRegistry {
    /// Mounts in registration order.
    mounts: RwLock<Vec<Mount>>,
}

impl MountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mount. Returns false if the id was already registered.
    pub fn register_mount(
        &self,
        id: impl Into<String>,
        graph: Arc<Graph>,
        priority: i32,
        is_implicit: bool,
    ) -> bool {
        let id = id.into();
        let mut mounts = self.mounts.write().unwrap_or_else(PoisonError::into_inner);
        if mounts.iter().any(|m| m.id == id) {
            warn!(mount = %id, "mount already registered; ignoring");
            return false;
        }

        info!(
            mount = %id,
            store = %graph.store_id(),
            priority,
            is_implicit,
            instances = graph.len(),
            "mount registered"
        );
        mounts.push(Mount {
            id,
            graph,
            priority,
            is_implicit,
        });
        true
    }

    /// Get a mount by id.
    pub fn get(&self, id: &str) -> Option<Mount> {
        self.read().iter().find(|m| m.id == id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().iter().any(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Mounts by descending priority, ties in registration order.
    pub fn ordered(&self) -> Vec<Mount> {
        let mut mounts = self.read().clone();
        mounts.sort_by(|a, b| b.priority.cmp(&a.priority));
        mounts
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Mount>> {
        self.mounts.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A model graph together with a snapshot of the mounts it can see.
#[derive(Debug)]
pub struct ModelView<'a> {
    local: &'a Graph,
    mounts: Vec<Mount>,
}

impl<'a> ModelView<'a> {
    pub fn new(local: &'a Graph, mounts: &MountRegistry) -> Self {
        Self {
            local,
            mounts: mounts.ordered(),
        }
    }

    /// A view of the local graph only.
    pub fn local_only(local: &'a Graph) -> Self {
        Self {
            local,
            mounts: Vec::new(),
        }
    }

    pub fn local(&self) -> &Graph {
        self.local
    }

    pub fn mounts(&self) -> &[Mount] {
        &self.mounts
    }
}

impl GraphView for ModelView<'_> {
    fn registry(&self) -> &Registry {
        self.local.registry()
    }

    fn graphs(&self) -> Vec<&Graph> {
        std::iter::once(self.local)
            .chain(self.mounts.iter().map(|m| m.graph.as_ref()))
            .collect()
    }

    fn graph(&self, store: StoreId) -> Option<&Graph> {
        if self.local.store_id() == store {
            return Some(self.local);
        }
        self.mounts
            .iter()
            .map(|m| m.graph.as_ref())
            .find(|g| g.store_id() == store)
    }
}
