//! Kernel configuration.

use crate::DEFAULT_MAX_STEPS;
use serde::{Deserialize, Serialize};

/// Switches injected by the embedding application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Queue and process binding rules at all.
    pub process_implied_relationships: bool,
    /// Mount supplied library graphs when a model is created.
    pub auto_mount_libraries: bool,
    /// Bound on rule evaluations per processing call.
    pub max_steps: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            process_implied_relationships: true,
            auto_mount_libraries: true,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl KernelConfig {
    pub fn with_implied_relationships(mut self, enabled: bool) -> Self {
        self.process_implied_relationships = enabled;
        self
    }

    pub fn with_auto_mount(mut self, enabled: bool) -> Self {
        self.auto_mount_libraries = enabled;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}
