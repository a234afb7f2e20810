//! Run-wide settings.

use serde::{Deserialize, Serialize};

const fn default_pretty() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Worker threads per index build. `0` uses one per core, `1` runs
    /// sequentially on the calling thread.
    #[serde(default)]
    pub threads: usize,

    /// Indent written artifacts by two spaces.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            pretty: default_pretty(),
        }
    }
}

impl GeneralConfig {
    #[must_use]
    pub const fn is_sequential(&self) -> bool {
        self.threads == 1
    }
}
