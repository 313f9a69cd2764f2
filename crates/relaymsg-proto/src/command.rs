//! IRC commands understood by the relay extension.

use std::fmt::{self, Write};

use crate::error::MessageParseError;
use crate::response::Response;

/// An IRC command with its parameters.
///
/// Only the commands the relay path builds or inspects get typed variants.
/// Everything else, including a typed command that arrived with too few
/// parameters, is kept verbatim as [`Command::Raw`] so handlers can decide
/// how to react to the short form.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Command {
    /// `PRIVMSG <target> :<text>`
    PRIVMSG(String, String),
    /// `NOTICE <target> :<text>`
    NOTICE(String, String),
    /// `RELAYMSG <channel> <spoofed nick> :<text>` (client to server)
    RELAYMSG(String, String, String),
    /// `RRELAYMSG <origin uid> <channel> <spoofed nick> :<text>` (server to server)
    RRELAYMSG(String, String, String, String),
    /// Numeric reply with its parameters.
    Response(Response, Vec<String>),
    /// Any other command, name and parameters as received.
    Raw(String, Vec<String>),
}

impl Command {
    /// Build a command from its name and parameters.
    pub fn new(cmd: &str, args: Vec<&str>) -> Result<Command, MessageParseError> {
        if cmd.is_empty() {
            return Err(MessageParseError::InvalidCommand);
        }

        let upper = cmd.to_ascii_uppercase();
        let command = match (upper.as_str(), args.as_slice()) {
            ("PRIVMSG", [target, text, ..]) => Command::PRIVMSG(target.to_string(), text.to_string()),
            ("NOTICE", [target, text, ..]) => Command::NOTICE(target.to_string(), text.to_string()),
            ("RELAYMSG", [channel, nick, text, ..]) => {
                Command::RELAYMSG(channel.to_string(), nick.to_string(), text.to_string())
            }
            ("RRELAYMSG", [origin, channel, nick, text, ..]) => Command::RRELAYMSG(
                origin.to_string(),
                channel.to_string(),
                nick.to_string(),
                text.to_string(),
            ),
            _ => match upper.parse::<u16>().ok().and_then(Response::from_code) {
                Some(resp) => {
                    Command::Response(resp, args.iter().map(|a| a.to_string()).collect())
                }
                None => Command::Raw(upper, args.iter().map(|a| a.to_string()).collect()),
            },
        };
        Ok(command)
    }

    /// The command name as it appears on the wire.
    pub fn name(&self) -> String {
        match self {
            Command::PRIVMSG(..) => "PRIVMSG".to_string(),
            Command::NOTICE(..) => "NOTICE".to_string(),
            Command::RELAYMSG(..) => "RELAYMSG".to_string(),
            Command::RRELAYMSG(..) => "RRELAYMSG".to_string(),
            Command::Response(resp, _) => format!("{:03}", resp.code()),
            Command::Raw(name, _) => name.clone(),
        }
    }

    /// Positional parameters in wire order.
    pub fn args(&self) -> Vec<&str> {
        match self {
            Command::PRIVMSG(t, m) | Command::NOTICE(t, m) => vec![t.as_str(), m.as_str()],
            Command::RELAYMSG(c, n, m) => vec![c.as_str(), n.as_str(), m.as_str()],
            Command::RRELAYMSG(o, c, n, m) => vec![o.as_str(), c.as_str(), n.as_str(), m.as_str()],
            Command::Response(_, args) | Command::Raw(_, args) => {
                args.iter().map(String::as_str).collect()
            }
        }
    }
}

/// Whether the final parameter must be written with a leading colon.
pub(crate) fn needs_colon_prefix(arg: &str) -> bool {
    arg.is_empty() || arg.contains(' ') || arg.starts_with(':')
}

/// Write `cmd` followed by `args`, always colon-prefixing the last one.
///
/// Used for commands whose last parameter is free-form text.
fn write_cmd_freeform(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;
    let Some((last, middle)) = args.split_last() else {
        return Ok(());
    };
    for arg in middle {
        f.write_char(' ')?;
        f.write_str(arg)?;
    }
    f.write_str(" :")?;
    f.write_str(last)
}

/// Write `cmd` followed by `args`, colon-prefixing the last one only if needed.
fn write_cmd(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;
    let Some((last, middle)) = args.split_last() else {
        return Ok(());
    };
    for arg in middle {
        f.write_char(' ')?;
        f.write_str(arg)?;
    }
    f.write_char(' ')?;
    if needs_colon_prefix(last) {
        f.write_char(':')?;
    }
    f.write_str(last)
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::PRIVMSG(t, m) => write_cmd_freeform(f, "PRIVMSG", &[t, m]),
            Command::NOTICE(t, m) => write_cmd_freeform(f, "NOTICE", &[t, m]),
            Command::RELAYMSG(c, n, m) => write_cmd_freeform(f, "RELAYMSG", &[c, n, m]),
            Command::RRELAYMSG(o, c, n, m) => write_cmd_freeform(f, "RRELAYMSG", &[o, c, n, m]),
            Command::Response(resp, args) => {
                let code = format!("{:03}", resp.code());
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                write_cmd_freeform(f, &code, &args)
            }
            Command::Raw(name, args) => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                write_cmd(f, name, &args)
            }
        }
    }
}
