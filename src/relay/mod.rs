//! The relay-message core.
//!
//! A relay event enters either through `RELAYMSG` from a local bridge client
//! or through `RRELAYMSG` from a peer server. Both paths validate the spoofed
//! nick with [`nick`], deliver a `PRIVMSG` sourced from
//! `<spoofed>!<display hostmask>` to local channel members, and then pass an
//! `RRELAYMSG` on to the rest of the network.

pub mod nick;
pub mod tags;

use relaymsg_proto::{Command, Message, Prefix, Tag};

pub use nick::{NickRejection, check_format, validate};

/// Capability name, message tag key and authorization path of the extension.
pub const RELAYMSG_TAG: &str = "draft/relaymsg";

/// Privilege an operator block must grant to use `RELAYMSG`.
pub const RELAYMSG_PRIVILEGE: &str = "relaymsg";

/// Display hostmask used until configuration overrides it.
pub const DEFAULT_HOSTMASK: &str = "unreal@localhost";

/// Longest accepted spoofed nick, in bytes.
pub const MAX_SPOOFED_NICK_LEN: usize = 35;

/// Where a relay event entered this server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// A directly connected client, by UID.
    Local(String),
    /// A peer server forwarded the event. Holds the originating client
    /// identifier exactly as it appeared on the wire.
    Remote(String),
}

impl Origin {
    /// The identifier placed in the first `RRELAYMSG` parameter.
    pub fn id(&self) -> &str {
        match self {
            Origin::Local(uid) | Origin::Remote(uid) => uid,
        }
    }
}

/// One relay event, alive for the duration of a single command.
#[derive(Debug, Clone)]
pub struct RelayEvent {
    pub origin: Origin,
    pub channel: String,
    pub spoofed_nick: String,
    pub text: String,
    /// Tags carried with the event. Built at local origination, passed
    /// through untouched on the remote path.
    pub tags: Vec<Tag>,
}

impl RelayEvent {
    /// The channel `PRIVMSG` local members see, without tags.
    pub fn channel_line(&self, display_hostmask: &str) -> Message {
        Message::privmsg(self.channel.clone(), self.text.clone())
            .with_prefix(Prefix::with_hostmask(self.spoofed_nick.clone(), display_hostmask))
    }

    /// The `RRELAYMSG` frame sent to peers, carrying every event tag.
    pub fn relay_frame(&self, server_name: &str) -> Message {
        Message::from(Command::RRELAYMSG(
            self.origin.id().to_string(),
            self.channel.clone(),
            self.spoofed_nick.clone(),
            self.text.clone(),
        ))
        .with_prefix(Prefix::ServerName(server_name.to_string()))
        .with_tags(Some(self.tags.clone()))
    }

    /// The provenance tag value, if the event carries one.
    pub fn provenance(&self) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.key() == RELAYMSG_TAG)
            .and_then(Tag::value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(origin: Origin) -> RelayEvent {
        RelayEvent {
            origin,
            channel: "#chat".into(),
            spoofed_nick: "alice/web".into(),
            text: "hello world".into(),
            tags: vec![Tag::new(RELAYMSG_TAG, Some("bridge".into()))],
        }
    }

    #[test]
    fn channel_line_uses_display_hostmask() {
        let line = event(Origin::Local("001AAAAAC".into())).channel_line(DEFAULT_HOSTMASK);
        assert_eq!(
            line.to_string(),
            ":alice/web!unreal@localhost PRIVMSG #chat :hello world\r\n"
        );
    }

    #[test]
    fn relay_frame_carries_origin_and_tags() {
        let frame = event(Origin::Remote("002AAAAAB".into())).relay_frame("irc.one.test");
        assert_eq!(
            frame.to_string(),
            "@draft/relaymsg=bridge :irc.one.test RRELAYMSG 002AAAAAB #chat alice/web :hello world\r\n"
        );
    }

    #[test]
    fn provenance_reads_relay_tag() {
        assert_eq!(event(Origin::Local("x".into())).provenance(), Some("bridge"));
    }
}
