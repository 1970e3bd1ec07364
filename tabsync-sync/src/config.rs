//! Sync configuration.

use serde::{Deserialize, Serialize};
use tabsync_model::DEFAULT_MAX_HISTORY;
use tabsync_types::FeatureKind;

/// Configuration shared by every feature mounted in a [`SyncContext`].
///
/// [`SyncContext`]: crate::SyncContext
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Namespace for storage keys and channel names.
    pub key_prefix: String,
    /// Undo snapshots kept per feature.
    pub max_history: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            key_prefix: "tabsync".to_string(),
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl SyncConfig {
    /// The persistent store key for `kind`, e.g. `tabsync:footer`.
    pub fn storage_key(&self, kind: FeatureKind) -> String {
        format!("{}:{}", self.key_prefix, kind)
    }

    /// The broadcast channel name for `kind`, e.g. `tabsync:footer:sync`.
    pub fn channel_name(&self, kind: FeatureKind) -> String {
        format!("{}:{}:sync", self.key_prefix, kind)
    }
}
