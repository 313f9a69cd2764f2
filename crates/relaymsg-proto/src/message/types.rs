use std::borrow::Cow;

use crate::command::Command;
use crate::prefix::Prefix;

/// An owned IRC message.
///
/// Contains the complete parsed representation of an IRC message including
/// optional IRCv3 tags, optional prefix/source, and the command with parameters.
#[derive(Clone, PartialEq, Debug)]
pub struct Message {
    /// IRCv3 message tags (e.g., `time`, `msgid`, `draft/relaymsg`).
    pub tags: Option<Vec<Tag>>,
    /// Message prefix/source (e.g., `nick!user@host`).
    pub prefix: Option<Prefix>,
    /// The IRC command and its parameters.
    pub command: Command,
}

/// An IRCv3 message tag: key and optional value.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Tag(pub Cow<'static, str>, pub Option<String>);

impl Tag {
    /// Create a new tag.
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Tag(Cow::Owned(key.into()), value)
    }

    /// The tag key.
    pub fn key(&self) -> &str {
        &self.0
    }

    /// The tag value, if any.
    pub fn value(&self) -> Option<&str> {
        self.1.as_deref()
    }
}

impl Message {
    /// Get the nickname from the message prefix, if present.
    pub fn source_nickname(&self) -> Option<&str> {
        self.prefix.as_ref().and_then(|p| match p {
            Prefix::Nickname(name, _, _) | Prefix::Masked(name, _) => Some(&name[..]),
            _ => None,
        })
    }

    /// Get the value of an IRCv3 tag by key.
    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags
            .as_ref()?
            .iter()
            .find(|Tag(k, _)| k.as_ref() == key)
            .and_then(|Tag(_, v)| v.as_deref())
    }

    /// Whether a tag with this key is present (with or without a value).
    pub fn has_tag(&self, key: &str) -> bool {
        self.tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|Tag(k, _)| k.as_ref() == key))
    }

    /// Get the message ID tag.
    pub fn msgid(&self) -> Option<&str> {
        self.tag_value("msgid")
    }

    /// Get the labeled-response label tag.
    pub fn label(&self) -> Option<&str> {
        self.tag_value("label")
    }

    /// Get a positional parameter by index.
    pub fn arg(&self, idx: usize) -> Option<&str> {
        self.command.args().get(idx).copied()
    }

    /// Create a PRIVMSG message to a target with text
    #[must_use]
    pub fn privmsg<T, M>(target: T, text: M) -> Self
    where
        T: Into<String>,
        M: Into<String>,
    {
        Command::PRIVMSG(target.into(), text.into()).into()
    }

    /// Create a NOTICE message to a target with text
    #[must_use]
    pub fn notice<T, M>(target: T, text: M) -> Self
    where
        T: Into<String>,
        M: Into<String>,
    {
        Command::NOTICE(target.into(), text.into()).into()
    }

    /// Add a tag to this message.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        self.tags
            .get_or_insert_with(Vec::new)
            .push(Tag::new(key, value.map(Into::into)));
        self
    }

    /// Replace the tags of this message.
    #[must_use]
    pub fn with_tags(mut self, tags: Option<Vec<Tag>>) -> Self {
        self.tags = tags.filter(|t| !t.is_empty());
        self
    }

    /// Set the prefix of this message.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }
}

impl From<Command> for Message {
    fn from(command: Command) -> Message {
        Message {
            tags: None,
            prefix: None,
            command,
        }
    }
}
