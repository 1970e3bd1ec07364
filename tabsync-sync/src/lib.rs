//! Cross-tab synchronization for tabsync.
//!
//! Keeps one feature state consistent across every tab of the application on
//! a device:
//!
//! - [`SyncContext`]: per-tab resources (store, multicast, clock, config);
//!   mounts at most one [`FeatureSync`] per feature
//! - [`FeatureSync`]: hydrates from storage on mount, persists and broadcasts
//!   every change, and merges incoming broadcasts by last-write-wins
//! - [`Multicast`] / [`ChannelHandle`]: the broadcast seam; [`LocalHub`] is
//!   the in-process implementation
//!
//! Loops are broken twice over: a tab ignores messages carrying its own
//! [`TabId`](tabsync_types::TabId), and a state materially equal to the local
//! one is never applied, so a re-broadcast of an applied state dies at the
//! next hop.

mod channel;
mod config;
mod context;
mod error;
mod hook;
mod local;

pub use channel::{ChannelHandle, ChannelMessage, Multicast};
pub use config::SyncConfig;
pub use context::SyncContext;
pub use error::{SyncError, SyncResult};
pub use hook::{FeatureSync, ReceiveOutcome, SyncStats};
pub use local::{LocalChannel, LocalHub};
