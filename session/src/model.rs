//! The model facade.

use sema_binding::{BindingResolver, BindingState, KernelConfig, ProcessStats};
use sema_constraint::{ConstraintChecker, Violations};
use sema_core::{ElementRef, GraphResult, InstanceId, Value};
use sema_graph::{Graph, LifecycleHandler, Store};
use sema_identity::{assign_session_ids, IdentityAssigner, IdentityConfig};
use sema_names::{ModelView, MountRegistry};
use sema_registry::Registry;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{SessionError, SessionResult};

/// A frozen graph to mount when a model is created.
#[derive(Debug, Clone)]
pub struct Library {
    pub id: String,
    pub graph: Arc<Graph>,
    pub priority: i32,
}

impl Library {
    pub fn new(id: impl Into<String>, graph: Arc<Graph>, priority: i32) -> Self {
        Self {
            id: id.into(),
            graph,
            priority,
        }
    }
}

/// A model under construction.
pub struct Model {
    store: Store,
    resolver: BindingResolver,
    mounts: Arc<MountRegistry>,
    identity: IdentityAssigner,
}

impl Model {
    /// Create an empty model whose resolver listens on its store.
    pub fn new(
        registry: Arc<Registry>,
        mounts: Arc<MountRegistry>,
        config: KernelConfig,
    ) -> SessionResult<Self> {
        let mut store = Store::new(registry)?;
        let resolver = BindingResolver::new(config);
        resolver.attach(&mut store);
        debug!(store = %store.store_id(), "model created");
        Ok(Self {
            store,
            resolver,
            mounts,
            identity: IdentityAssigner::default(),
        })
    }

    /// Create a model and mount the given libraries, when the configuration
    /// allows automatic mounting.
    pub fn with_libraries(
        registry: Arc<Registry>,
        mounts: Arc<MountRegistry>,
        config: KernelConfig,
        libraries: impl IntoIterator<Item = Library>,
    ) -> SessionResult<Self> {
        let auto_mount = config.auto_mount_libraries;
        let model = Self::new(registry, mounts, config)?;
        for library in libraries {
            if !auto_mount {
                debug!(mount = %library.id, "automatic mounting disabled; library ignored");
                continue;
            }
            model
                .mounts
                .register_mount(library.id, library.graph, library.priority, true);
        }
        Ok(model)
    }

    pub fn with_identity(mut self, config: IdentityConfig) -> Self {
        self.identity = IdentityAssigner::new(config);
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Mutable store access, for the containment helpers of `sema_names`.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn graph(&self) -> &Graph {
        self.store.graph()
    }

    pub fn mounts(&self) -> &Arc<MountRegistry> {
        &self.mounts
    }

    /// The local graph plus every current mount.
    pub fn view(&self) -> ModelView<'_> {
        ModelView::new(self.store.graph(), &self.mounts)
    }

    pub fn element_ref(&self, id: InstanceId) -> ElementRef {
        self.store.element_ref(id)
    }

    // ==================== Store ====================

    pub fn create(&mut self, class_name: &str) -> SessionResult<InstanceId> {
        Ok(self.store.create(class_name)?)
    }

    pub fn set_property(
        &mut self,
        id: InstanceId,
        name: &str,
        value: impl Into<Value>,
    ) -> SessionResult<()> {
        Ok(self.store.set_property(id, name, value)?)
    }

    pub fn link(&mut self, source: InstanceId, target: InstanceId, assoc: &str) -> SessionResult<()> {
        Ok(self.store.link(source, target, assoc)?)
    }

    /// Link to an element that may live in a mounted library.
    pub fn link_ref(&mut self, source: InstanceId, target: ElementRef, assoc: &str) -> SessionResult<()> {
        Ok(self.store.link_ref(source, target, assoc)?)
    }

    pub fn navigate(&self, id: InstanceId, assoc: &str) -> GraphResult<Vec<ElementRef>> {
        self.store.navigate(id, assoc)
    }

    pub fn get_property(&self, id: InstanceId, name: &str) -> Option<&Value> {
        self.store.get_property(id, name)
    }

    pub fn register_lifecycle_handler(&mut self, handler: impl LifecycleHandler + 'static) {
        self.store.register_lifecycle_handler(handler);
    }

    // ==================== Binding ====================

    /// Derive implied edges for everything queued so far.
    pub fn process_all_pending(&mut self) -> SessionResult<ProcessStats> {
        Ok(self
            .resolver
            .process_all_pending(&mut self.store, &self.mounts)?)
    }

    pub fn binding_state(&self, id: InstanceId) -> BindingState {
        self.resolver.state(id)
    }

    pub fn pending_count(&self) -> usize {
        self.resolver.pending_count()
    }

    // ==================== Names ====================

    /// Resolve a qualified name against the model, then the mounts.
    pub fn resolve_global(&self, name: &str) -> Option<ElementRef> {
        sema_names::resolve_global(&self.view(), name)
    }

    pub fn qualified_name_of(&self, element: ElementRef) -> Option<String> {
        sema_names::qualified_name_of(&self.view(), element)
    }

    // ==================== Identity ====================

    /// Stamp deterministic ids on the model's named content.
    pub fn assign_standard_ids(&mut self) -> SessionResult<usize> {
        Ok(self.identity.assign(&mut self.store)?)
    }

    /// Stamp random ids on everything still without one.
    pub fn assign_session_ids(&mut self) -> SessionResult<usize> {
        Ok(assign_session_ids(&mut self.store)?)
    }

    // ==================== Constraints ====================

    /// Check every instance of the model.
    pub fn check_constraints(&self) -> SessionResult<Violations> {
        Ok(ConstraintChecker::new(&self.view()).check_all()?)
    }

    // ==================== Publishing ====================

    /// Freeze the model and mount it under `id`. Returns the frozen graph.
    pub fn into_library(self, id: impl Into<String>, priority: i32) -> SessionResult<Arc<Graph>> {
        let id = id.into();
        let Self { store, mounts, .. } = self;
        let graph = store.freeze();
        if !mounts.register_mount(id.clone(), Arc::clone(&graph), priority, false) {
            return Err(SessionError::duplicate_mount(id));
        }
        info!(mount = %id, instances = graph.len(), "model published as library");
        Ok(graph)
    }
}
