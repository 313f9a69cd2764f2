//! Channel name utilities.

/// Extension trait for checking if a string is a valid IRC channel name.
pub trait ChannelExt {
    /// Check if this string is a valid IRC channel name.
    ///
    /// Valid channel names start with `#`, `&`, `+` or `!`, contain no space,
    /// comma, BEL, NUL or other control character, and are at most 50
    /// characters long.
    fn is_channel_name(&self) -> bool;
}

impl ChannelExt for &str {
    fn is_channel_name(&self) -> bool {
        let mut chars = self.chars();

        match chars.next() {
            Some('#' | '&' | '+' | '!') => {}
            _ => return false,
        }

        if self.chars().count() > 50 {
            return false;
        }

        chars.all(|c| c != ' ' && c != ',' && !c.is_control())
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_prefixes() {
        assert!("#chat".is_channel_name());
        assert!("&local".is_channel_name());
        assert!(!"alice/web".is_channel_name());
        assert!(!"".is_channel_name());
    }

    #[test]
    fn test_channel_invalid_chars() {
        assert!(!"#a,b".is_channel_name());
        assert!(!"#a b".is_channel_name());
        assert!(!"#a\x07".is_channel_name());
    }
}
