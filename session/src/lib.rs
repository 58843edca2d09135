//! Sema Session
//!
//! One model under construction, wired to the shared mount registry.
//!
//! Responsibilities:
//! - Own the model store and its binding resolver
//! - Mount supplied libraries and publish finished models as libraries
//! - Route name lookups, identity assignment and constraint checks
//!   through a view that includes the mounts

mod error;
mod model;

pub use error::{SessionError, SessionResult};
pub use model::{Library, Model};
