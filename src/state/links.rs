//! Peer server links.

use dashmap::DashMap;
use relaymsg_proto::Message;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::dashmap_ext::DashMapExt;

/// A directly connected peer server.
#[derive(Debug, Clone)]
pub struct Link {
    pub sid: String,
    pub name: String,
    pub sender: mpsc::Sender<Arc<Message>>,
}

/// Result of a broadcast to peers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastOutcome {
    pub sent: usize,
    pub dropped: usize,
}

pub struct LinkManager {
    pub links: DashMap<String, Link>,
}

impl LinkManager {
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
        }
    }

    pub fn add(&self, link: Link) {
        debug!(sid = %link.sid, name = %link.name, "Peer linked");
        self.links.insert(link.sid.clone(), link);
    }

    pub fn remove(&self, sid: &str) -> Option<Link> {
        self.links.remove(sid).map(|(_, link)| link)
    }

    /// Send `msg` to every peer except `except` (split horizon).
    ///
    /// Never waits: a full or closed peer queue loses that copy.
    pub fn broadcast(&self, msg: Arc<Message>, except: Option<&str>) -> BroadcastOutcome {
        let mut outcome = BroadcastOutcome::default();
        for link in self.links.values_cloned() {
            if except == Some(link.sid.as_str()) {
                continue;
            }
            match link.sender.try_send(Arc::clone(&msg)) {
                Ok(()) => outcome.sent += 1,
                Err(e) => {
                    outcome.dropped += 1;
                    crate::metrics::record_dropped_delivery("peer");
                    warn!(sid = %link.sid, error = %e, "Dropped frame for peer");
                }
            }
        }
        outcome
    }
}

impl Default for LinkManager {
    fn default() -> Self {
        Self::new()
    }
}
