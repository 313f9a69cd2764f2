//! Relay message handlers.
//!
//! `RELAYMSG` lets an authorized bridge client speak in a channel under a
//! spoofed nick. Local fan-out is shared with the server-to-server path.

mod delivery;
mod relaymsg;

pub use delivery::{DeliveryStats, deliver_to_channel};
pub use relaymsg::RelayMsgHandler;
