//! Message tags on relayed traffic.
//!
//! The `draft/relaymsg` tag names the bridge client that issued a relay. It
//! is only trusted when it arrives from a server link; clients cannot set it.

use std::collections::HashSet;

use relaymsg_proto::{Message, Tag};

use super::RELAYMSG_TAG;

/// Capability gating `msgid` and every other tag not listed below.
pub const MESSAGE_TAGS_CAP: &str = "message-tags";
/// Capability gating the `time` tag.
pub const SERVER_TIME_CAP: &str = "server-time";

/// Whether a tag with this key may be accepted on input from a client.
pub fn accepted_from_client(key: &str) -> bool {
    key != RELAYMSG_TAG
}

/// Drop tags a client is not allowed to send.
///
/// Returns `None` when nothing had to be removed, so callers can keep the
/// original message.
pub fn strip_client_tags(msg: &Message) -> Option<Message> {
    let tags = msg.tags.as_ref()?;
    if tags.iter().all(|t| accepted_from_client(t.key())) {
        return None;
    }
    let kept: Vec<Tag> = tags
        .iter()
        .filter(|t| accepted_from_client(t.key()))
        .cloned()
        .collect();
    Some(msg.clone().with_tags(Some(kept)))
}

/// Tags attached when a relay event is first created on this server.
pub fn origination_tags(issuer_nick: &str) -> Vec<Tag> {
    vec![
        Tag::new(RELAYMSG_TAG, Some(issuer_nick.to_string())),
        Tag::new("msgid", Some(uuid::Uuid::new_v4().to_string())),
        Tag::new(
            "time",
            Some(
                chrono::Utc::now()
                    .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                    .to_string(),
            ),
        ),
    ]
}

/// The subset of `tags` a client with the given capabilities may see.
pub fn for_client(tags: &[Tag], caps: &HashSet<String>) -> Vec<Tag> {
    tags.iter()
        .filter(|t| match t.key() {
            RELAYMSG_TAG => caps.contains(RELAYMSG_TAG),
            "time" => caps.contains(SERVER_TIME_CAP),
            "label" => false,
            _ => caps.contains(MESSAGE_TAGS_CAP),
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(list: &[&str]) -> HashSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn origination_tags_have_provenance_msgid_and_time() {
        let tags = origination_tags("bridge");
        assert_eq!(tags[0], Tag::new(RELAYMSG_TAG, Some("bridge".into())));
        assert_eq!(tags[1].key(), "msgid");
        assert_eq!(tags[1].value().map(str::len), Some(36));
        let time = tags[2].value().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok(), "{time}");
        assert!(time.ends_with('Z'));
    }

    #[test]
    fn msgids_are_fresh() {
        assert_ne!(origination_tags("a")[1], origination_tags("a")[1]);
    }

    #[test]
    fn client_filter_follows_capabilities() {
        let tags = origination_tags("bridge");

        assert!(for_client(&tags, &caps(&[])).is_empty());

        let only_relay = for_client(&tags, &caps(&[RELAYMSG_TAG]));
        assert_eq!(only_relay.len(), 1);
        assert_eq!(only_relay[0].key(), RELAYMSG_TAG);

        let keys: Vec<_> = for_client(&tags, &caps(&[MESSAGE_TAGS_CAP, SERVER_TIME_CAP]))
            .into_iter()
            .map(|t| t.key().to_string())
            .collect();
        assert_eq!(keys, vec!["msgid", "time"]);
    }

    #[test]
    fn strip_removes_only_relay_tag() {
        let msg: Message = "@draft/relaymsg=forged;+typing=active RELAYMSG #c n/x :hi"
            .parse()
            .unwrap();
        let cleaned = strip_client_tags(&msg).expect("tag was present");
        assert!(!cleaned.has_tag(RELAYMSG_TAG));
        assert_eq!(cleaned.tag_value("+typing"), Some("active"));
    }

    #[test]
    fn strip_is_noop_without_relay_tag() {
        let msg: Message = "@+typing=active RELAYMSG #c n/x :hi".parse().unwrap();
        assert!(strip_client_tags(&msg).is_none());
        let bare: Message = "RELAYMSG #c n/x :hi".parse().unwrap();
        assert!(strip_client_tags(&bare).is_none());
    }

    #[test]
    fn strip_drops_tag_section_when_emptied() {
        let msg: Message = "@draft/relaymsg=x RELAYMSG #c n/x :hi".parse().unwrap();
        assert_eq!(strip_client_tags(&msg).unwrap().tags, None);
    }
}
