//! Sema Core Types
//!
//! This crate provides the foundational types used throughout Sema:
//! - Identity types (StoreId, InstanceId, ElementRef, RuleId)
//! - Scalar property values (the Value enum)
//! - Common graph error types

mod error;
mod id;
mod value;

pub use error::*;
pub use id::*;
pub use value::*;
