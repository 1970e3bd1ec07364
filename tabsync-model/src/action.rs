//! Reducer actions for local mutations.

use crate::feature::{Feature, StateOf};
use tabsync_types::ScopeMode;

/// A local edit to a feature state.
///
/// Reducing an action that would not change anything is a no-op: the clock is
/// not advanced and listeners are not notified.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<M, P> {
    SetEnabled(bool),
    SetMode(M),
    /// Replaces the scope. Paths are trimmed, blanks dropped and duplicates
    /// removed, keeping first occurrences.
    SetScope { mode: ScopeMode, paths: Vec<String> },
    AddScopePath(String),
    RemoveScopePath(String),
    /// Commits a new payload: the current one goes onto the undo history and
    /// the redo stack is cleared.
    Commit(P),
    SetActive(Option<String>),
    /// Clears the dirty flag after the payload has been saved elsewhere.
    MarkSaved,
    Undo,
    Redo,
    /// Returns to the default state. The clock keeps moving forward.
    Reset,
}

fn normalize_paths(paths: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(paths.len());
    for path in paths {
        let trimmed = path.trim();
        if !trimmed.is_empty() && !out.iter().any(|p| p == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}

/// Applies `action` to `state`. Returns true if the state changed.
pub(crate) fn reduce<F: Feature>(
    state: &mut StateOf<F>,
    action: Action<F::Mode, F::Payload>,
    max_history: usize,
) -> bool {
    match action {
        Action::SetEnabled(enabled) => replace(&mut state.enabled, enabled),
        Action::SetMode(mode) => replace(&mut state.mode, mode),
        Action::SetScope { mode, paths } => {
            let paths = normalize_paths(paths);
            let changed = state.scope_mode != mode || state.scope_paths != paths;
            state.scope_mode = mode;
            state.scope_paths = paths;
            changed
        }
        Action::AddScopePath(path) => {
            let path = path.trim();
            if path.is_empty() || state.scope_paths.iter().any(|p| p == path) {
                return false;
            }
            state.scope_paths.push(path.to_string());
            true
        }
        Action::RemoveScopePath(path) => {
            let before = state.scope_paths.len();
            let path = path.trim();
            state.scope_paths.retain(|p| p != path);
            state.scope_paths.len() != before
        }
        Action::Commit(payload) => {
            if payload == state.payload {
                return false;
            }
            let previous = std::mem::replace(&mut state.payload, payload);
            push_bounded(&mut state.history, previous, max_history);
            state.future.clear();
            state.dirty = true;
            true
        }
        Action::SetActive(active_id) => replace(&mut state.active_id, active_id),
        Action::MarkSaved => replace(&mut state.dirty, false),
        Action::Undo => {
            let Some(previous) = state.history.pop() else {
                return false;
            };
            let current = std::mem::replace(&mut state.payload, previous);
            state.future.push(current);
            state.dirty = true;
            true
        }
        Action::Redo => {
            let Some(next) = state.future.pop() else {
                return false;
            };
            let current = std::mem::replace(&mut state.payload, next);
            push_bounded(&mut state.history, current, max_history);
            state.dirty = true;
            true
        }
        Action::Reset => {
            let mut fresh = F::default_state();
            fresh.updated_at = state.updated_at;
            if *state == fresh {
                return false;
            }
            *state = fresh;
            true
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn push_bounded<T>(stack: &mut Vec<T>, value: T, max: usize) {
    if max == 0 {
        return;
    }
    stack.push(value);
    if stack.len() > max {
        let excess = stack.len() - max;
        stack.drain(..excess);
    }
}
