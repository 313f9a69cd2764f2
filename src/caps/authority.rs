//! Capability Authority - The capability mint.

use super::irc::RelayMsgCap;
use super::tokens::{Cap, Capability};
use crate::relay::RELAYMSG_PRIVILEGE;
use crate::state::Matrix;
use std::sync::Arc;
use tracing::{debug, trace};

/// The sole minter of capability tokens.
///
/// Each request evaluates the user's privileges, logs the grant or denial,
/// and returns `Some(Cap<T>)` only when authorized.
pub struct CapabilityAuthority {
    matrix: Arc<Matrix>,
}

impl CapabilityAuthority {
    #[inline]
    pub fn new(matrix: Arc<Matrix>) -> Self {
        Self { matrix }
    }

    /// Nick and privilege check result for `uid`, or `None` if unknown.
    async fn lookup(&self, uid: &str, privilege: &str) -> Option<(String, bool)> {
        let user = self.matrix.user_manager.get(uid)?;
        let user = user.read().await;
        Some((user.nick.clone(), user.has_privilege(privilege)))
    }

    fn log_grant<T: Capability>(&self, nick: &str, uid: &str, scope: &T::Scope)
    where
        T::Scope: std::fmt::Debug,
    {
        debug!(
            capability = T::NAME,
            nick = %nick,
            uid = %uid,
            scope = ?scope,
            "Capability granted"
        );
    }

    fn log_denial<T: Capability>(&self, nick: &str, uid: &str, scope: &T::Scope)
    where
        T::Scope: std::fmt::Debug,
    {
        debug!(
            capability = T::NAME,
            nick = %nick,
            uid = %uid,
            scope = ?scope,
            "Capability denied"
        );
    }

    /// Request permission to use `RELAYMSG`.
    ///
    /// Granted when the user holds the `relaymsg` privilege.
    pub async fn request_relaymsg_cap(&self, uid: &str) -> Option<Cap<RelayMsgCap>> {
        let scope = uid.to_string();
        match self.lookup(uid, RELAYMSG_PRIVILEGE).await {
            Some((nick, true)) => {
                self.log_grant::<RelayMsgCap>(&nick, uid, &scope);
                Some(Cap::new(scope))
            }
            Some((nick, false)) => {
                self.log_denial::<RelayMsgCap>(&nick, uid, &scope);
                None
            }
            None => {
                trace!(uid = %uid, "Capability request for unknown user");
                None
            }
        }
    }
}
