//! Sema Tests
//!
//! Fixtures shared by the integration tests: the kernel registry, a
//! reduced standard library, and helpers for inspecting implied edges.

pub mod assertion;
pub mod library;

pub mod prelude {
    pub use crate::assertion::*;
    pub use crate::library::*;
    pub use sema_binding::{BindingError, BindingState, KernelConfig, ProcessStats};
    pub use sema_core::{ElementRef, InstanceId, Value};
    pub use sema_graph::{Graph, GraphView};
    pub use sema_identity::{IdentityAssigner, IdentityConfig};
    pub use sema_names::{
        add_alias, add_import, add_owned_edge, add_owned_feature, add_owned_member, ImportKind,
        MountRegistry,
    };
    pub use crate::init_tracing;
    pub use sema_registry::{ClassDef, Registry};
    pub use sema_session::{Library, Model, SessionError};
    pub use std::sync::Arc;
}

/// Install a `tracing` subscriber filtered by `RUST_LOG`. Safe to call from
/// every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
