//! Per-build feature flags.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tabsync_types::FeatureKind;
use tracing::warn;

/// The set of features compiled into (or switched on for) the running build.
///
/// A feature missing from the set is off, so an empty or unreadable flag
/// source keeps every surface on its legacy variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildFlags {
    enabled: BTreeSet<FeatureKind>,
}

impl BuildFlags {
    /// No features enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every feature enabled.
    #[must_use]
    pub fn all() -> Self {
        Self {
            enabled: FeatureKind::ALL.into_iter().collect(),
        }
    }

    /// Builder-style enable.
    #[must_use]
    pub fn with(mut self, kind: FeatureKind) -> Self {
        self.enabled.insert(kind);
        self
    }

    /// Parses a comma-separated list of feature names, e.g. the value of an
    /// environment variable. Unknown names are skipped.
    #[must_use]
    pub fn parse_list(raw: &str) -> Self {
        let mut flags = Self::new();
        for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match name.parse::<FeatureKind>() {
                Ok(kind) => flags.enable(kind),
                Err(_) => warn!("ignoring unknown build flag {name:?}"),
            }
        }
        flags
    }

    pub fn enable(&mut self, kind: FeatureKind) {
        self.enabled.insert(kind);
    }

    pub fn disable(&mut self, kind: FeatureKind) {
        self.enabled.remove(&kind);
    }

    #[must_use]
    pub fn is_enabled(&self, kind: FeatureKind) -> bool {
        self.enabled.contains(&kind)
    }

    /// Iterates over the enabled features in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = FeatureKind> + '_ {
        self.enabled.iter().copied()
    }
}
