//! In-memory reactive container for one feature state.

use crate::action::{reduce, Action};
use crate::feature::{Feature, StateOf};
use std::fmt;
use std::sync::Arc;
use tabsync_types::Clock;
use tracing::trace;

/// Default number of payload snapshots kept for undo.
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Handle returned by [`Slice::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<F> = Box<dyn FnMut(&StateOf<F>)>;

/// Owns the live state of feature `F`.
///
/// All changes go through [`Slice::dispatch`] (local edits, which advance the
/// clock) or [`Slice::hydrate`] (wholesale replacement from storage or another
/// tab, which adopts the incoming clock). Listeners run after every change.
pub struct Slice<F: Feature> {
    state: StateOf<F>,
    clock: Arc<dyn Clock>,
    max_history: usize,
    revision: u64,
    listeners: Vec<(ListenerId, Listener<F>)>,
    next_listener: u64,
}

impl<F: Feature> Slice<F> {
    /// Creates a slice holding the feature's default state.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_state(F::default_state(), clock)
    }

    pub fn with_state(state: StateOf<F>, clock: Arc<dyn Clock>) -> Self {
        Self {
            state,
            clock,
            max_history: DEFAULT_MAX_HISTORY,
            revision: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Caps the undo history. Zero disables history.
    #[must_use]
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    pub fn state(&self) -> &StateOf<F> {
        &self.state
    }

    /// Number of state changes since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Applies a local action. Returns true if the state changed, in which
    /// case `updated_at` has strictly increased.
    pub fn dispatch(&mut self, action: Action<F::Mode, F::Payload>) -> bool {
        if !reduce::<F>(&mut self.state, action, self.max_history) {
            return false;
        }
        self.state.updated_at = self.state.updated_at.tick(self.clock.as_ref());
        trace!(feature = %F::KIND, updated_at = %self.state.updated_at, "local change");
        self.changed();
        true
    }

    /// Replaces the whole state. Returns false if `next` is identical to the
    /// current state.
    pub fn hydrate(&mut self, next: StateOf<F>) -> bool {
        if self.state == next {
            return false;
        }
        self.state = next;
        trace!(feature = %F::KIND, updated_at = %self.state.updated_at, "hydrated");
        self.changed();
        true
    }

    /// Registers a listener called with the new state after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&StateOf<F>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn changed(&mut self) {
        self.revision += 1;
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }
}

impl<F: Feature> fmt::Debug for Slice<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slice")
            .field("feature", &F::KIND)
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
