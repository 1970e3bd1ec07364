//! Persistent storage layer for tabsync.
//!
//! Provides the durable half of feature-state replication:
//!
//! - [`KeyValueStore`]: a shared string store, one whole-value entry per
//!   feature key; [`MemoryStore`] and [`SqliteStore`] implement it
//! - [`codec`]: encodes a feature state to a JSON blob and decodes untrusted
//!   blobs back into a [`PartialState`], validating every field on its own
//!
//! Writes are whole-value overwrites. There is no locking across processes:
//! concurrent writers race and the last write wins, which the sync layer
//! resolves through `updatedAt`.

pub mod codec;
mod error;
mod kv;
mod sqlite;

pub use codec::PartialState;
pub use error::{StorageError, StorageResult};
pub use kv::{KeyValueStore, MemoryStore};
pub use sqlite::SqliteStore;
