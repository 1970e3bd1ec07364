//! Whole-document last-writer-wins.
//!
//! A remote state replaces the local one only when it is materially different
//! and strictly newer. Equal stamps never apply, so two tabs holding
//! different values under the same stamp do not flip-flop.

use crate::feature::FeatureMode;
use crate::state::FeatureState;
use std::cmp::Ordering;

/// What to do with an incoming remote state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteVerdict {
    /// Newer and different: replace local state.
    Apply,
    /// Nothing observable would change (typically our own echo).
    Unchanged,
    /// Same stamp, different content: keep local.
    Tie,
    /// Older than local: keep local.
    Stale,
}

impl RemoteVerdict {
    #[must_use]
    pub fn should_apply(self) -> bool {
        self == Self::Apply
    }
}

/// Decides whether `remote` should replace `local`.
pub fn remote_verdict<M: FeatureMode, P: PartialEq>(
    local: &FeatureState<M, P>,
    remote: &FeatureState<M, P>,
) -> RemoteVerdict {
    if local.materially_eq(remote) {
        return RemoteVerdict::Unchanged;
    }
    match remote.updated_at.cmp(&local.updated_at) {
        Ordering::Greater => RemoteVerdict::Apply,
        Ordering::Equal => RemoteVerdict::Tie,
        Ordering::Less => RemoteVerdict::Stale,
    }
}
