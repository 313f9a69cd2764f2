//! IRC command handlers.
//!
//! Handlers receive an owned [`Message`](relaymsg_proto::Message) already
//! parsed by the connection layer. Use `msg.arg(n)` to access arguments.

mod cap;
pub mod core;
pub mod helpers;
mod messaging;
mod server;

pub use self::cap::CapHandler;
pub use self::core::{Context, PostRegHandler, Registry, ServerHandler};
pub use self::helpers::{server_notice, with_label};
pub use self::messaging::{DeliveryStats, RelayMsgHandler, deliver_to_channel};
pub use self::server::RRelayMsgHandler;
pub use crate::error::{HandlerError, HandlerResult};
