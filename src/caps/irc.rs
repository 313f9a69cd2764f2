//! IRC capability types.

use super::tokens::Capability;

/// Permission to post `RELAYMSG` lines under a spoofed nick.
///
/// Scope: the UID the capability was granted to.
pub struct RelayMsgCap;

impl Capability for RelayMsgCap {
    type Scope = String;
    const NAME: &'static str = "oper:relaymsg";
}
