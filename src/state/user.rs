//! User management state.

use dashmap::DashMap;
use relaymsg_proto::Message;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};

use super::dashmap_ext::DashMapExt;
use super::uid::{Uid, UidGenerator};

/// A connected user.
#[derive(Debug, Clone)]
pub struct User {
    pub uid: Uid,
    pub nick: String,
    pub user: String,
    pub host: String,
    /// Negotiated IRCv3 capabilities, consulted when filtering tags.
    pub caps: HashSet<String>,
    /// Operator privileges (e.g. `relaymsg`).
    pub privileges: HashSet<String>,
}

impl User {
    pub fn has_privilege(&self, privilege: &str) -> bool {
        self.privileges.contains(privilege)
    }
}

/// Tracks local users and their outbound queues.
pub struct UserManager {
    pub users: DashMap<Uid, Arc<RwLock<User>>>,
    pub senders: DashMap<Uid, mpsc::Sender<Arc<Message>>>,
    pub uid_gen: UidGenerator,
}

impl UserManager {
    pub fn new(server_sid: String) -> Self {
        Self {
            users: DashMap::new(),
            senders: DashMap::new(),
            uid_gen: UidGenerator::new(server_sid),
        }
    }

    /// Register a user and its outbound queue. The user's `uid` must be set.
    pub fn add_local_user(&self, user: User, sender: mpsc::Sender<Arc<Message>>) {
        let uid = user.uid.clone();
        self.senders.insert(uid.clone(), sender);
        self.users.insert(uid, Arc::new(RwLock::new(user)));
    }

    /// Forget a user. Channel memberships are left to the caller.
    pub fn remove_user(&self, uid: &str) {
        self.users.remove(uid);
        self.senders.remove(uid);
    }

    pub fn get(&self, uid: &str) -> Option<Arc<RwLock<User>>> {
        self.users.get_cloned(uid)
    }
}
