//! In-process multicast bus.
//!
//! Every handle opened on a [`LocalHub`] (or any of its clones) on the same
//! channel name sees the others' publishes. Used to run several simulated tabs
//! inside one process.

use crate::channel::{ChannelHandle, ChannelMessage, Multicast};
use crate::error::{SyncError, SyncResult};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tabsync_types::TabId;
use tracing::trace;

type Inbox = Arc<Mutex<VecDeque<ChannelMessage>>>;

#[derive(Debug)]
struct Subscriber {
    id: u64,
    inbox: Inbox,
}

#[derive(Debug, Default)]
struct HubInner {
    next_id: u64,
    channels: HashMap<String, Vec<Subscriber>>,
}

/// A shared in-memory bus. Clones refer to the same bus.
#[derive(Debug, Clone, Default)]
pub struct LocalHub {
    inner: Arc<Mutex<HubInner>>,
}

impl LocalHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open handles listening on `name`.
    pub fn subscriber_count(&self, name: &str) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.channels.get(name).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn detach(&self, name: &str, id: u64) {
        if let Ok(mut inner) = self.inner.lock() {
            if let Some(subscribers) = inner.channels.get_mut(name) {
                subscribers.retain(|s| s.id != id);
                if subscribers.is_empty() {
                    inner.channels.remove(name);
                }
            }
        }
    }
}

impl Multicast for LocalHub {
    fn open(&self, name: &str, origin: TabId) -> SyncResult<Box<dyn ChannelHandle>> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| SyncError::Unavailable("hub lock poisoned".into()))?;
        let id = inner.next_id;
        inner.next_id += 1;
        let inbox: Inbox = Arc::default();
        inner
            .channels
            .entry(name.to_string())
            .or_default()
            .push(Subscriber {
                id,
                inbox: inbox.clone(),
            });
        trace!(channel = name, id, "opened local channel");

        Ok(Box::new(LocalChannel {
            hub: self.clone(),
            name: name.to_string(),
            id,
            origin,
            inbox,
            closed: false,
        }))
    }
}

/// A handle on a [`LocalHub`] channel. Dropping it closes it.
#[derive(Debug)]
pub struct LocalChannel {
    hub: LocalHub,
    name: String,
    id: u64,
    origin: TabId,
    inbox: Inbox,
    closed: bool,
}

impl ChannelHandle for LocalChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn publish(&self, body: serde_json::Value) -> SyncResult<()> {
        if self.closed {
            return Err(SyncError::ChannelClosed);
        }
        let inner = self
            .hub
            .inner
            .lock()
            .map_err(|_| SyncError::Unavailable("hub lock poisoned".into()))?;
        let Some(subscribers) = inner.channels.get(&self.name) else {
            return Ok(());
        };
        let message = ChannelMessage {
            origin: self.origin,
            body,
        };
        for subscriber in subscribers.iter().filter(|s| s.id != self.id) {
            if let Ok(mut inbox) = subscriber.inbox.lock() {
                inbox.push_back(message.clone());
            }
        }
        Ok(())
    }

    fn recv(&mut self) -> Option<ChannelMessage> {
        if self.closed {
            return None;
        }
        self.inbox.lock().ok()?.pop_front()
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.hub.detach(&self.name, self.id);
        if let Ok(mut inbox) = self.inbox.lock() {
            inbox.clear();
        }
        trace!(channel = %self.name, id = self.id, "closed local channel");
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for LocalChannel {
    fn drop(&mut self) {
        self.close();
    }
}
