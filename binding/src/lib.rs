//! Sema Semantic Binding
//!
//! Derive implied specializations and subsettings from the binding rules
//! declared in the registry.
//!
//! Responsibilities:
//! - Evaluate rule conditions against live instances
//! - Queue instances on creation and link events
//! - Resolve rule targets through the name layer, deferring misses
//! - Materialize implied edges, never redundantly and never twice

mod config;
mod error;
mod evaluator;
mod queue;
mod resolver;

pub use config::KernelConfig;
pub use error::{BindingError, BindingResult};
pub use evaluator::ConditionEvaluator;
pub use queue::{BindingHandler, BindingState, PendingQueue};
pub use resolver::{BindingResolver, ProcessStats};

/// Default bound on rule evaluations per `process_all_pending` call.
pub const DEFAULT_MAX_STEPS: usize = 10_000;
