//! # relaymsg-proto
//!
//! IRC message model for servers implementing the IRCv3 `draft/relaymsg`
//! extension: owned messages with tags and prefixes, a nom-based line parser,
//! wire serialisation, the numerics the relay handlers reply with, and the
//! capability definition advertised to clients.
//!
//! ```rust
//! use relaymsg_proto::{Command, Message, Prefix};
//!
//! let msg: Message = "@draft/relaymsg=bridge :irc.test RRELAYMSG 001AAAAAB #chat alice/web :hi"
//!     .parse()
//!     .expect("valid line");
//! assert!(matches!(msg.command, Command::RRELAYMSG(..)));
//! assert_eq!(msg.tag_value("draft/relaymsg"), Some("bridge"));
//!
//! let out = Message::privmsg("#chat", "hello")
//!     .with_prefix(Prefix::new("alice/web", "unreal", "localhost"));
//! assert_eq!(out.to_string(), ":alice/web!unreal@localhost PRIVMSG #chat :hello\r\n");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod caps;
pub mod casemap;
pub mod chan;
pub mod command;
pub mod error;
pub mod message;
pub mod prefix;
pub mod response;

pub use self::caps::{CapabilityDef, CAPABILITIES, RELAYMSG_CAP};
pub use self::casemap::{irc_eq, irc_to_lower};
pub use self::chan::ChannelExt;
pub use self::command::Command;
pub use self::error::{MessageParseError, ProtocolError};
pub use self::message::{Message, Tag};
pub use self::prefix::Prefix;
pub use self::response::Response;
