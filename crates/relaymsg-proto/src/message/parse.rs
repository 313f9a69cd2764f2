//! `FromStr` for [`Message`] on top of the nom parser.

use std::borrow::Cow;
use std::str::FromStr;

use crate::command::Command;
use crate::error::{MessageParseError, ProtocolError};
use crate::prefix::Prefix;

use super::nom_parser::ParsedMessage;
use super::tags::unescape_tag_value;
use super::types::{Message, Tag};

/// Longest accepted line: 8191 bytes of tags plus the 512 byte body.
pub const MAX_LINE_LEN: usize = 8191 + 512;

/// Keys seen on nearly every relayed line borrow a static string.
#[inline]
fn intern_tag_key(key: &str) -> Cow<'static, str> {
    match key {
        "msgid" => Cow::Borrowed("msgid"),
        "time" => Cow::Borrowed("time"),
        "label" => Cow::Borrowed("label"),
        "draft/relaymsg" => Cow::Borrowed("draft/relaymsg"),
        _ => Cow::Owned(key.to_owned()),
    }
}

fn parse_tags_string(tags_str: &str) -> Vec<Tag> {
    tags_str
        .split(';')
        .filter(|s| !s.is_empty())
        .map(|tag| {
            let mut iter = tag.splitn(2, '=');
            let key = iter.next().unwrap_or("");
            let value = iter.next().map(unescape_tag_value);
            Tag(intern_tag_key(key), value)
        })
        .collect()
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Message, Self::Err> {
        if s.is_empty() {
            return Err(ProtocolError::InvalidMessage {
                string: s.to_owned(),
                cause: MessageParseError::EmptyMessage,
            });
        }
        if s.len() > MAX_LINE_LEN {
            return Err(ProtocolError::MessageTooLong {
                actual: s.len(),
                limit: MAX_LINE_LEN,
            });
        }

        let parsed = ParsedMessage::parse(s).map_err(|parse_err| ProtocolError::InvalidMessage {
            string: s.to_owned(),
            cause: MessageParseError::ParseContext {
                position: parse_err.position,
                context: format!("{:?}", parse_err.kind),
            },
        })?;

        let tags = parsed.tags.map(parse_tags_string).filter(|t| !t.is_empty());

        let prefix = match parsed.prefix {
            Some(p) => Some(
                p.parse::<Prefix>()
                    .map_err(|cause| ProtocolError::InvalidMessage {
                        string: s.to_owned(),
                        cause,
                    })?,
            ),
            None => None,
        };

        let command = Command::new(parsed.command, parsed.params.to_vec()).map_err(|cause| {
            ProtocolError::InvalidMessage {
                string: s.to_owned(),
                cause,
            }
        })?;

        Ok(Message {
            tags,
            prefix,
            command,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relaymsg() {
        let msg: Message = "RELAYMSG #chat alice/web :hello\r\n".parse().unwrap();
        match msg.command {
            Command::RELAYMSG(chan, nick, text) => {
                assert_eq!(chan, "#chat");
                assert_eq!(nick, "alice/web");
                assert_eq!(text, "hello");
            }
            other => panic!("expected RELAYMSG, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_tagged_privmsg() {
        let msg: Message =
            "@draft/relaymsg=bridge;msgid=abc :alice/web!unreal@localhost PRIVMSG #chat :hi\r\n"
                .parse()
                .unwrap();
        assert_eq!(msg.tag_value("draft/relaymsg"), Some("bridge"));
        assert_eq!(msg.msgid(), Some("abc"));
        assert_eq!(msg.source_nickname(), Some("alice/web"));
    }

    #[test]
    fn test_parse_empty_message() {
        assert!("".parse::<Message>().is_err());
    }

    #[test]
    fn test_parse_too_long() {
        let line = format!("PRIVMSG #c :{}", "x".repeat(MAX_LINE_LEN));
        assert!(matches!(
            line.parse::<Message>(),
            Err(ProtocolError::MessageTooLong { .. })
        ));
    }

    #[test]
    fn test_intern_relay_tag() {
        assert!(matches!(intern_tag_key("draft/relaymsg"), Cow::Borrowed(_)));
        assert!(matches!(intern_tag_key("+custom"), Cow::Owned(_)));
    }
}
