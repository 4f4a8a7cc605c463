//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default page size for list actions.
const fn default_limit() -> u32 {
    20
}

/// Upper bound on any requested page size.
const fn default_max_limit() -> u32 {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Page size used when a list request does not specify one.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Largest page size a list request may ask for.
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl GeneralConfig {
    /// Resolve the effective page size: requested value (or the default),
    /// clamped to `1..=max_limit`.
    #[must_use]
    pub fn clamp_limit(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit.max(1))
    }
}
