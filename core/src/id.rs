//! Identity types for Sema elements.
//!
//! Instances live in an arena owned by one store and are addressed by
//! [`InstanceId`]. Because a model refers to elements of mounted libraries,
//! any cross-store reference is an [`ElementRef`]: the owning store plus the
//! arena key.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_STORE_ID: AtomicU32 = AtomicU32::new(1);

/// Identifier of one instance graph (a model store or a mounted library).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreId(pub u32);

impl StoreId {
    /// Create a StoreId from a raw value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Allocate a process-unique StoreId.
    pub fn fresh() -> Self {
        Self(NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw value.
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Arena key of an instance within its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

impl InstanceId {
    /// Create a new InstanceId from a raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i{}", self.0)
    }
}

/// A reference to an instance in any store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef {
    pub store: StoreId,
    pub instance: InstanceId,
}

impl ElementRef {
    pub fn new(store: StoreId, instance: InstanceId) -> Self {
        Self { store, instance }
    }

    /// Returns true if this reference points into the given store.
    pub fn is_in(&self, store: StoreId) -> bool {
        self.store == store
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.store, self.instance)
    }
}

/// Externally meaningful element identifier (deterministic v5 for standard
/// library content, random v4 otherwise).
pub type ElementId = uuid::Uuid;

/// Identifier of a binding rule in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub u32);

impl RuleId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}
