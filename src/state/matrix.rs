//! The Matrix - Central shared state for the relay server.
//!
//! The Matrix holds users, channels, peer links and the relay policy in
//! concurrent data structures accessible from any async task.

use crate::config::{Config, TestReport};
use crate::policy::PolicyStore;

use super::channel::ChannelManager;
use super::links::LinkManager;
use super::user::UserManager;

/// Server identifier (TS6 format: 3 characters).
pub type Sid = String;

/// This server's identity information.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub sid: Sid,
    pub name: String,
}

/// The Matrix - Central shared state container.
pub struct Matrix {
    pub server_info: ServerInfo,
    pub user_manager: UserManager,
    pub channel_manager: ChannelManager,
    pub link_manager: LinkManager,
    /// Live relay policy, replaced only by [`Matrix::rehash`].
    pub policy: PolicyStore,
}

impl Matrix {
    /// Build server state from configuration, applying its `relaymsg` block.
    ///
    /// The returned report holds any diagnostics; with errors the default
    /// policy stays in force.
    pub fn new(config: &Config) -> (Self, TestReport) {
        let server_info = ServerInfo {
            sid: config.server.sid.clone(),
            name: config.server.name.clone(),
        };
        let matrix = Self {
            user_manager: UserManager::new(server_info.sid.clone()),
            channel_manager: ChannelManager::new(),
            link_manager: LinkManager::new(),
            policy: PolicyStore::default(),
            server_info,
        };
        let report = matrix.rehash(config);
        (matrix, report)
    }

    /// Re-read the `relaymsg` block: test it, then run it if it is clean.
    ///
    /// A configuration without the block leaves the policy untouched.
    pub fn rehash(&self, config: &Config) -> TestReport {
        match config.relaymsg_block() {
            Some(block) => self.policy.rehash(&block),
            None => TestReport::default(),
        }
    }
}
