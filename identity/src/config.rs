//! Identity configuration.

use serde::{Deserialize, Serialize};

/// Default prefix of the URL hashed into each top-level namespace id.
pub const DEFAULT_BASE_URL: &str = "https://www.omg.org/spec/KerML/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Prefix prepended to a top-level member's qualified name.
    pub base_url: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl IdentityConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}
