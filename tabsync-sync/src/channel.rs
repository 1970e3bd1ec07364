//! Local multicast abstraction.
//!
//! A multicast backend connects every browsing context of one application on
//! one device. Contexts open a named channel, publish JSON messages to every
//! other handle on the same name and drain what others sent them. Delivery is
//! best effort: no acknowledgements, and nothing is replayed to handles
//! opened after a publish.

use crate::error::SyncResult;
use serde::{Deserialize, Serialize};
use tabsync_types::TabId;

/// One broadcast, as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// The tab that published the message.
    pub origin: TabId,
    /// The raw, unvalidated state object.
    pub body: serde_json::Value,
}

/// A multicast backend (in-process bus, OS-level IPC, loopback socket, ...).
pub trait Multicast: Send + Sync {
    /// Opens a handle on the channel `name` for the tab `origin`.
    fn open(&self, name: &str, origin: TabId) -> SyncResult<Box<dyn ChannelHandle>>;
}

/// An open handle on a named channel.
///
/// A handle never receives its own publishes. After [`ChannelHandle::close`]
/// it neither sends nor receives.
pub trait ChannelHandle: Send {
    fn name(&self) -> &str;

    /// Sends `body` to every other open handle on this channel.
    fn publish(&self, body: serde_json::Value) -> SyncResult<()>;

    /// Takes the next pending message, if any.
    fn recv(&mut self) -> Option<ChannelMessage>;

    /// Stops listening. Pending messages are dropped.
    fn close(&mut self);

    fn is_closed(&self) -> bool;
}
