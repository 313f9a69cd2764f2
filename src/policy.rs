//! Relay policy and its store.
//!
//! [`PolicyStore`] holds the live [`RelayPolicy`] as an `Arc` snapshot.
//! Handlers take one snapshot at the start of an event; a rehash builds a
//! new policy and swaps it in whole, so an event never observes a
//! half-applied block.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{error, info, warn};

use crate::config::relaymsg::{run_block, test_block};
use crate::config::{ConfigBlock, TestReport};
use crate::relay::DEFAULT_HOSTMASK;

/// Process-wide relay settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayPolicy {
    /// `user@host` shown after the `!` of relayed senders.
    pub display_hostmask: String,
    /// Whether spoofed nicks must contain `/`.
    pub require_separator: bool,
}

impl Default for RelayPolicy {
    fn default() -> Self {
        Self {
            display_hostmask: DEFAULT_HOSTMASK.to_string(),
            require_separator: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct PolicyStore {
    current: RwLock<Arc<RelayPolicy>>,
}

impl PolicyStore {
    pub fn new(policy: RelayPolicy) -> Self {
        Self {
            current: RwLock::new(Arc::new(policy)),
        }
    }

    /// The policy in force right now.
    pub fn snapshot(&self) -> Arc<RelayPolicy> {
        Arc::clone(&*self.current.read())
    }

    /// Test phase only. Never changes the store.
    pub fn test(&self, block: &ConfigBlock) -> TestReport {
        test_block(block)
    }

    /// Run phase only: apply `block` on top of the current policy.
    ///
    /// Callers are expected to have tested the block first.
    pub fn run(&self, block: &ConfigBlock) {
        let mut current = self.current.write();
        let mut next = (**current).clone();
        run_block(block, &mut next);
        *current = Arc::new(next);
    }

    /// Test `block` and, if it has no errors, run it.
    ///
    /// Diagnostics are logged either way and returned to the caller.
    pub fn rehash(&self, block: &ConfigBlock) -> TestReport {
        let report = self.test(block);

        for diag in report.warnings() {
            warn!("{diag}");
        }
        for diag in report.errors() {
            error!("{diag}");
        }

        if report.is_ok() {
            self.run(block);
            let policy = self.snapshot();
            info!(
                hostmask = %policy.display_hostmask,
                require_separator = policy.require_separator,
                "relaymsg policy applied"
            );
        } else {
            warn!(
                errors = report.error_count(),
                "relaymsg block rejected, keeping previous policy"
            );
        }

        report
    }
}
