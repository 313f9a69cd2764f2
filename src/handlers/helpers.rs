//! Reply construction helpers shared by handlers.

use relaymsg_proto::{Message, Prefix};

/// Helper to create a server NOTICE message.
pub fn server_notice<T: Into<String>>(server_name: &str, target: &str, text: T) -> Message {
    Message::notice(target, text).with_prefix(Prefix::ServerName(server_name.to_string()))
}

/// Attach a labeled-response label, if the triggering command had one.
pub fn with_label(msg: Message, label: Option<&str>) -> Message {
    match label {
        Some(value) => msg.with_tag("label", Some(value)),
        None => msg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_from_server() {
        let msg = server_notice("irc.test", "bridge", "Sending message to #chat");
        assert_eq!(
            msg.to_string(),
            ":irc.test NOTICE bridge :Sending message to #chat\r\n"
        );
    }

    #[test]
    fn label_is_attached() {
        let msg = with_label(Message::notice("a", "b"), Some("xyz"));
        assert_eq!(msg.label(), Some("xyz"));
        assert_eq!(with_label(Message::notice("a", "b"), None).tags, None);
    }
}
