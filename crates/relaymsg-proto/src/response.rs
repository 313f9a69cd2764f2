//! IRC numeric replies used by the relay handlers.

use std::fmt;

use crate::command::Command;
use crate::message::Message;

/// Numeric IRC replies (RFC 2812 and common extensions).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum Response {
    /// 403 - No such channel
    ERR_NOSUCHCHANNEL = 403,
    /// 421 - Unknown command
    ERR_UNKNOWNCOMMAND = 421,
    /// 461 - Not enough parameters
    ERR_NEEDMOREPARAMS = 461,
    /// 481 - Permission denied, not an IRC operator
    ERR_NOPRIVILEGES = 481,
}

impl Response {
    /// Returns the numeric code as u16
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Creates a Response from a numeric code
    pub fn from_code(code: u16) -> Option<Response> {
        let resp = match code {
            403 => Response::ERR_NOSUCHCHANNEL,
            421 => Response::ERR_UNKNOWNCOMMAND,
            461 => Response::ERR_NEEDMOREPARAMS,
            481 => Response::ERR_NOPRIVILEGES,
            _ => return None,
        };
        Some(resp)
    }

    /// Check if this is an error response.
    #[inline]
    pub fn is_error(&self) -> bool {
        (400..600).contains(&self.code())
    }

    fn error_msg(response: Response, args: Vec<String>) -> Message {
        Message::from(Command::Response(response, args))
    }

    /// `403 <client> <channel> :No such channel`
    pub fn err_nosuchchannel(client: &str, channel: &str) -> Message {
        Self::error_msg(
            Response::ERR_NOSUCHCHANNEL,
            vec![client.to_string(), channel.to_string(), "No such channel".to_string()],
        )
    }

    /// `421 <client> <command> :Unknown command`
    pub fn err_unknowncommand(client: &str, command: &str) -> Message {
        Self::error_msg(
            Response::ERR_UNKNOWNCOMMAND,
            vec![client.to_string(), command.to_string(), "Unknown command".to_string()],
        )
    }

    /// `461 <client> <command> :Not enough parameters`
    pub fn err_needmoreparams(client: &str, command: &str) -> Message {
        Self::error_msg(
            Response::ERR_NEEDMOREPARAMS,
            vec![client.to_string(), command.to_string(), "Not enough parameters".to_string()],
        )
    }

    /// `481 <client> :Permission Denied- You're not an IRC operator`
    pub fn err_noprivileges(client: &str) -> Message {
        Self::error_msg(
            Response::ERR_NOPRIVILEGES,
            vec![
                client.to_string(),
                "Permission Denied- You're not an IRC operator".to_string(),
            ],
        )
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}
