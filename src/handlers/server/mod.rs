//! Server-to-server command handlers.

mod rrelaymsg;

pub use rrelaymsg::RRelayMsgHandler;
