//! Per-connection session state handed to handlers.

use std::collections::HashSet;

/// A registered client connection.
#[derive(Debug, Clone, Default)]
pub struct RegisteredState {
    pub nick: String,
    pub user: String,
    /// CAP protocol version (301 or 302).
    pub cap_version: u32,
    /// Capabilities this client negotiated.
    pub capabilities: HashSet<String>,
}

impl RegisteredState {
    pub fn has_cap(&self, cap: &str) -> bool {
        self.capabilities.contains(cap)
    }
}

/// A linked peer server.
#[derive(Debug, Clone)]
pub struct ServerState {
    pub sid: String,
    pub name: String,
}
