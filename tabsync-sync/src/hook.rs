//! The per-feature sync handle.

use crate::channel::{ChannelHandle, ChannelMessage};
use crate::context::MountSlot;
use std::fmt;
use std::sync::Arc;
use tabsync_gate::{Gate, GateDecision};
use tabsync_model::{remote_verdict, Action, Feature, ListenerId, RemoteVerdict, Slice, StateOf};
use tabsync_storage::{codec, KeyValueStore};
use tabsync_types::{Clock, TabId};
use tracing::{debug, info, warn};

/// What [`FeatureSync::receive`] did with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiveOutcome {
    /// The remote state replaced the local one.
    Applied,
    /// The remote state matched the local one.
    Unchanged,
    /// The remote state was older.
    Stale,
    /// Different content under the same clock value.
    Tie,
    /// The body was not a state object.
    Malformed,
    /// The message came from this tab.
    OwnEcho,
}

/// Counters kept by a [`FeatureSync`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub published: u64,
    pub applied: u64,
    pub unchanged: u64,
    pub stale: u64,
    pub ties: u64,
    pub malformed: u64,
}

impl SyncStats {
    /// Messages that reached the merge step or were rejected as malformed.
    pub fn received(&self) -> u64 {
        self.applied + self.unchanged + self.stale + self.ties + self.malformed
    }
}

/// Live, synchronized state of feature `F` in one tab.
///
/// Obtained from [`SyncContext::mount`]. Every change, local or remote, is
/// persisted and broadcast. Incoming messages queue on the channel until
/// [`FeatureSync::pump`] is called. Dropping the handle closes the channel
/// and frees the feature's mount slot.
///
/// [`SyncContext::mount`]: crate::SyncContext::mount
pub struct FeatureSync<F: Feature> {
    slice: Slice<F>,
    channel: Box<dyn ChannelHandle>,
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
    tab_id: TabId,
    stats: SyncStats,
    _slot: MountSlot,
}

impl<F: Feature> FeatureSync<F> {
    pub(crate) fn new(
        tab_id: TabId,
        storage_key: String,
        store: Arc<dyn KeyValueStore>,
        channel: Box<dyn ChannelHandle>,
        clock: Arc<dyn Clock>,
        max_history: usize,
        slot: MountSlot,
    ) -> Self {
        Self {
            slice: Slice::new(clock).with_max_history(max_history),
            channel,
            store,
            storage_key,
            tab_id,
            stats: SyncStats::default(),
            _slot: slot,
        }
    }

    /// Loads the persisted state if it is newer than the in-memory one.
    ///
    /// Missing fields fall back to the feature defaults. A blob without a
    /// valid `updatedAt` is ignored.
    pub(crate) fn hydrate_from_storage(&mut self) -> bool {
        let raw = match self.store.get(&self.storage_key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(feature = %F::KIND, "failed to read persisted state: {e}");
                None
            }
        };
        let Some(partial) = codec::decode::<F::Mode, F::Payload>(raw.as_deref()) else {
            return false;
        };
        let Some(stamp) = partial.updated_at else {
            debug!(feature = %F::KIND, "persisted state has no clock, ignoring");
            return false;
        };
        if !stamp.is_after(&self.slice.state().updated_at) {
            return false;
        }

        let next = partial.merge_over(F::default_state());
        if !self.slice.hydrate(next) {
            return false;
        }
        info!(feature = %F::KIND, updated_at = %stamp, "hydrated from storage");
        self.publish();
        true
    }

    pub fn state(&self) -> &StateOf<F> {
        self.slice.state()
    }

    pub fn revision(&self) -> u64 {
        self.slice.revision()
    }

    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    pub fn tab_id(&self) -> TabId {
        self.tab_id
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn channel_name(&self) -> &str {
        self.channel.name()
    }

    /// Applies a local edit, then persists and broadcasts it.
    pub fn dispatch(&mut self, action: Action<F::Mode, F::Payload>) -> bool {
        if !self.slice.dispatch(action) {
            return false;
        }
        self.publish();
        true
    }

    /// Writes the current state to storage and broadcasts it. Failures are
    /// logged; the in-memory state is kept either way.
    fn publish(&mut self) {
        let state = self.slice.state();
        match codec::encode(state) {
            Ok(blob) => {
                if let Err(e) = self.store.set(&self.storage_key, &blob) {
                    warn!(feature = %F::KIND, "failed to persist state: {e}");
                }
            }
            Err(e) => warn!(feature = %F::KIND, "failed to encode state: {e}"),
        }
        match codec::to_value(state) {
            Ok(body) => match self.channel.publish(body) {
                Ok(()) => self.stats.published += 1,
                Err(e) => warn!(feature = %F::KIND, "failed to broadcast state: {e}"),
            },
            Err(e) => warn!(feature = %F::KIND, "failed to encode state: {e}"),
        }
    }

    /// Merges one incoming message.
    ///
    /// Fields missing from the message keep their local values. The result
    /// replaces the local state only if its clock is strictly newer and it
    /// differs materially; an applied state is persisted and re-broadcast.
    pub fn receive(&mut self, message: &ChannelMessage) -> ReceiveOutcome {
        if message.origin == self.tab_id {
            return ReceiveOutcome::OwnEcho;
        }
        let Some(partial) = codec::decode_value::<F::Mode, F::Payload>(&message.body) else {
            self.stats.malformed += 1;
            debug!(feature = %F::KIND, origin = %message.origin, "dropping malformed message");
            return ReceiveOutcome::Malformed;
        };
        if partial.updated_at.is_none() {
            self.stats.malformed += 1;
            debug!(feature = %F::KIND, origin = %message.origin, "dropping message without clock");
            return ReceiveOutcome::Malformed;
        }

        let incoming = partial.merge_over(self.slice.state().clone());
        match remote_verdict(self.slice.state(), &incoming) {
            RemoteVerdict::Apply => {
                self.slice.hydrate(incoming);
                self.stats.applied += 1;
                debug!(feature = %F::KIND, origin = %message.origin, "applied remote state");
                self.publish();
                ReceiveOutcome::Applied
            }
            RemoteVerdict::Unchanged => {
                self.stats.unchanged += 1;
                ReceiveOutcome::Unchanged
            }
            RemoteVerdict::Tie => {
                self.stats.ties += 1;
                debug!(feature = %F::KIND, origin = %message.origin, "ignoring concurrent edit with equal clock");
                ReceiveOutcome::Tie
            }
            RemoteVerdict::Stale => {
                self.stats.stale += 1;
                ReceiveOutcome::Stale
            }
        }
    }

    /// Drains every queued message. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(message) = self.channel.recv() {
            if self.receive(&message) == ReceiveOutcome::Applied {
                applied += 1;
            }
        }
        applied
    }

    /// Registers a listener on the underlying slice.
    pub fn subscribe(&mut self, listener: impl FnMut(&StateOf<F>) + 'static) -> ListenerId {
        self.slice.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.slice.unsubscribe(id)
    }

    /// Evaluates the route gate for `location` against the current state.
    pub fn decide(&self, gate: &Gate, location: &str) -> GateDecision {
        gate.decide(&self.state().gate_input(F::KIND), location)
    }

    /// Closes the channel early. The state stays readable.
    pub fn close(&mut self) {
        self.channel.close();
    }
}

impl<F: Feature> Drop for FeatureSync<F> {
    fn drop(&mut self) {
        self.channel.close();
    }
}

impl<F: Feature> fmt::Debug for FeatureSync<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureSync")
            .field("feature", &F::KIND)
            .field("tab_id", &self.tab_id)
            .field("storage_key", &self.storage_key)
            .field("channel", &self.channel.name())
            .field("revision", &self.slice.revision())
            .field("stats", &self.stats)
            .finish()
    }
}
