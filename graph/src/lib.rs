//! Sema Instance Graph Store
//!
//! This crate provides the schema-driven instance storage:
//! - Instance arena with a class index
//! - Attribute storage validated against the registry
//! - Link slots with multiplicity and subset/redefine aliasing
//! - Lifecycle events for observers (the binding resolver's seam)
//! - A read view spanning a model store and its mounted libraries

mod event;
mod graph;
mod instance;
mod store;
mod view;

pub use event::{LifecycleHandler, StoreEvent};
pub use graph::Graph;
pub use instance::Instance;
pub use store::Store;
pub use view::GraphView;
