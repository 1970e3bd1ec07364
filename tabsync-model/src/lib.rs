//! Feature state model for tabsync.
//!
//! Defines the universal types every sync surface depends on:
//! - [`Feature`] / [`FeatureMode`]: what distinguishes one feature from another
//! - [`FeatureState`]: the replicated document (flags, scope, payload, clock)
//! - [`Action`]: the reducer vocabulary for local mutations
//! - [`Slice`]: the in-memory reactive container that owns one state
//! - [`remote_verdict`]: the whole-document last-write-wins rule
//!
//! The five concrete features live in [`features`].

mod action;
mod feature;
pub mod features;
mod lww;
mod slice;
mod state;

pub use action::Action;
pub use feature::{Feature, FeatureMode, StateOf};
pub use lww::{remote_verdict, RemoteVerdict};
pub use slice::{ListenerId, Slice, DEFAULT_MAX_HISTORY};
pub use state::FeatureState;
