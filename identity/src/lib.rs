//! Sema Identity
//!
//! Stable identifiers for standard library content:
//! - Deterministic v5 UUIDs derived from qualified names and containment paths
//! - Random v4 UUIDs for everything else

mod assigner;
mod config;
mod error;

pub use assigner::{assign_session_ids, IdentityAssigner};
pub use config::{IdentityConfig, DEFAULT_BASE_URL};
pub use error::{IdentityError, IdentityResult};
