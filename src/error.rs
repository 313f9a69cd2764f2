//! Unified error handling for relaymsgd.
//!
//! Handler errors carry their own metric label and, where the client should
//! hear about it, the numeric reply to send.

use relaymsg_proto::{Message, Prefix, Response};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("permission denied")]
    NoPrivileges,

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("send error: {0}")]
    Send(#[from] mpsc::error::SendError<Arc<Message>>),
}

impl HandlerError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams => "need_more_params",
            Self::NoPrivileges => "no_privileges",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::UnknownCommand(_) => "unknown_command",
            Self::Send(_) => "send_error",
        }
    }

    /// Convert to an IRC error reply message.
    ///
    /// Returns `None` for errors that don't warrant a client-visible reply.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, cmd_name: &str) -> Option<Message> {
        let mut msg = match self {
            Self::NeedMoreParams => Response::err_needmoreparams(nick, cmd_name),
            Self::NoPrivileges => Response::err_noprivileges(nick),
            Self::NoSuchChannel(chan) => Response::err_nosuchchannel(nick, chan),
            Self::UnknownCommand(cmd) => Response::err_unknowncommand(nick, cmd),
            Self::Send(_) => return None,
        };

        msg.prefix = Some(Prefix::ServerName(server_name.to_string()));
        Some(msg)
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_carry_server_prefix() {
        let reply = HandlerError::NeedMoreParams
            .to_irc_reply("irc.test", "bridge", "RELAYMSG")
            .unwrap();
        assert_eq!(
            reply.to_string(),
            ":irc.test 461 bridge RELAYMSG :Not enough parameters\r\n"
        );
    }

    #[test]
    fn no_such_channel_names_channel() {
        let reply = HandlerError::NoSuchChannel("#nope".into())
            .to_irc_reply("irc.test", "bridge", "RELAYMSG")
            .unwrap();
        assert_eq!(
            reply.to_string(),
            ":irc.test 403 bridge #nope :No such channel\r\n"
        );
    }

    #[test]
    fn send_errors_are_silent() {
        let err = HandlerError::from(mpsc::error::SendError(Arc::new(Message::notice("n", "x"))));
        assert!(err.to_irc_reply("irc.test", "n", "RELAYMSG").is_none());
        assert_eq!(err.error_code(), "send_error");
        assert_eq!(HandlerError::NoPrivileges.error_code(), "no_privileges");
    }
}
