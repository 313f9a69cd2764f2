//! Channel state.
//!
//! Channels are keyed by their RFC 1459 casefolded name and only track local
//! members; relayed lines are delivered to those members alone.

use dashmap::DashMap;
use relaymsg_proto::irc_to_lower;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::dashmap_ext::DashMapExt;
use super::uid::Uid;

#[derive(Debug, Clone)]
pub struct Channel {
    /// Name as first created.
    pub name: String,
    pub members: HashSet<Uid>,
}

pub struct ChannelManager {
    pub channels: DashMap<String, Arc<RwLock<Channel>>>,
}

impl ChannelManager {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    pub fn find(&self, name: &str) -> Option<Arc<RwLock<Channel>>> {
        self.channels.get_cloned(&irc_to_lower(name))
    }

    /// Add `uid` to `name`, creating the channel if needed.
    pub async fn join(&self, name: &str, uid: &str) {
        let channel = self
            .channels
            .entry(irc_to_lower(name))
            .or_insert_with(|| {
                Arc::new(RwLock::new(Channel {
                    name: name.to_string(),
                    members: HashSet::new(),
                }))
            })
            .value()
            .clone();
        channel.write().await.members.insert(uid.to_string());
    }

    /// Remove `uid` from `name`; empty channels are destroyed.
    pub async fn part(&self, name: &str, uid: &str) {
        let key = irc_to_lower(name);
        let Some(channel) = self.channels.get_cloned(&key) else {
            return;
        };
        let empty = {
            let mut guard = channel.write().await;
            guard.members.remove(uid);
            guard.members.is_empty()
        };
        if empty {
            self.channels.remove(&key);
        }
    }

    /// Snapshot of the local members of `name`.
    pub async fn local_members(&self, name: &str) -> Option<Vec<Uid>> {
        let channel = self.find(name)?;
        let members = channel.read().await.members.iter().cloned().collect();
        Some(members)
    }
}

impl Default for ChannelManager {
    fn default() -> Self {
        Self::new()
    }
}
