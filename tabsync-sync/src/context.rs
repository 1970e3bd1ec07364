//! Per-tab sync context.
//!
//! A [`SyncContext`] is the explicit, injectable replacement for process-wide
//! singletons: one per tab, created at start-up and handed to whatever mounts
//! feature surfaces. It owns the shared resources (store, multicast backend,
//! clock, configuration) and guarantees at most one live [`FeatureSync`] per
//! feature.

use crate::config::SyncConfig;
use crate::channel::Multicast;
use crate::error::{SyncError, SyncResult};
use crate::hook::FeatureSync;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tabsync_model::Feature;
use tabsync_storage::KeyValueStore;
use tabsync_types::{Clock, FeatureKind, SystemClock, TabId};
use tracing::info;

/// Shared resources of one tab.
#[derive(Clone)]
pub struct SyncContext {
    tab_id: TabId,
    config: SyncConfig,
    store: Arc<dyn KeyValueStore>,
    multicast: Arc<dyn Multicast>,
    clock: Arc<dyn Clock>,
    mounted: Arc<Mutex<HashSet<FeatureKind>>>,
}

impl SyncContext {
    /// Creates a context using the system clock and default configuration.
    pub fn new(store: Arc<dyn KeyValueStore>, multicast: Arc<dyn Multicast>) -> Self {
        Self::with_parts(
            store,
            multicast,
            Arc::new(SystemClock),
            SyncConfig::default(),
        )
    }

    pub fn with_parts(
        store: Arc<dyn KeyValueStore>,
        multicast: Arc<dyn Multicast>,
        clock: Arc<dyn Clock>,
        config: SyncConfig,
    ) -> Self {
        Self {
            tab_id: TabId::new(),
            config,
            store,
            multicast,
            clock,
            mounted: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn tab_id(&self) -> TabId {
        self.tab_id
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Returns true if `kind` has a live handle in this tab.
    pub fn is_mounted(&self, kind: FeatureKind) -> bool {
        self.mounted
            .lock()
            .map(|mounted| mounted.contains(&kind))
            .unwrap_or(false)
    }

    /// Mounts feature `F`: opens its channel and hydrates it from storage.
    ///
    /// Fails if `F` is already mounted in this tab. The slot is released when
    /// the returned handle is dropped.
    pub fn mount<F: Feature>(&self) -> SyncResult<FeatureSync<F>> {
        let slot = MountSlot::claim(self.mounted.clone(), F::KIND)?;
        let channel = self
            .multicast
            .open(&self.config.channel_name(F::KIND), self.tab_id)?;
        info!(feature = %F::KIND, tab = %self.tab_id, "mounting feature sync");

        let mut sync = FeatureSync::new(
            self.tab_id,
            self.config.storage_key(F::KIND),
            self.store.clone(),
            channel,
            self.clock.clone(),
            self.config.max_history,
            slot,
        );
        sync.hydrate_from_storage();
        Ok(sync)
    }
}

/// Marks a feature as mounted until dropped.
pub(crate) struct MountSlot {
    mounted: Arc<Mutex<HashSet<FeatureKind>>>,
    kind: FeatureKind,
}

impl MountSlot {
    fn claim(mounted: Arc<Mutex<HashSet<FeatureKind>>>, kind: FeatureKind) -> SyncResult<Self> {
        {
            let mut set = mounted
                .lock()
                .map_err(|_| SyncError::Unavailable("mount registry poisoned".into()))?;
            if !set.insert(kind) {
                return Err(SyncError::AlreadyMounted(kind));
            }
        }
        Ok(Self { mounted, kind })
    }
}

impl Drop for MountSlot {
    fn drop(&mut self) {
        if let Ok(mut set) = self.mounted.lock() {
            set.remove(&self.kind);
        }
    }
}
