//! Spoofed nick validation.
//!
//! Rules run in a fixed order and the first failure wins:
//! forbidden characters, then the `/` separator (when required), then length.
//! No case folding or Unicode normalisation is applied.

use std::fmt;

use super::MAX_SPOOFED_NICK_LEN;

/// Characters that may never appear in a spoofed nick.
pub const FORBIDDEN_CHARS: &[char] = &[
    ' ', '\t', '\n', '\r', '!', '+', '%', '@', '&', '#', '$', ':', '\'', '"', '?', '*', ',', '.',
];

/// Separator a spoofed nick must contain while `require_separator` is on.
pub const SEPARATOR: char = '/';

/// Why a spoofed nick was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NickRejection {
    InvalidCharacters,
    MissingSeparator,
    TooLong,
}

impl NickRejection {
    /// Text of the NOTICE sent back to the issuing client.
    pub fn notice_text(self) -> &'static str {
        match self {
            NickRejection::InvalidCharacters => "Invalid characters in spoofed nick",
            NickRejection::MissingSeparator => {
                "Invalid spoofed nick format (require-separator is yes; nick must contain /)"
            }
            NickRejection::TooLong => "Spoofed nick too long",
        }
    }

    /// Label used for metrics and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            NickRejection::InvalidCharacters => "invalid_characters",
            NickRejection::MissingSeparator => "missing_separator",
            NickRejection::TooLong => "too_long",
        }
    }
}

impl fmt::Display for NickRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notice_text())
    }
}

/// Character-set and separator checks only.
///
/// Used for frames arriving from peers, which skip the length limit.
pub fn check_format(name: &str, require_separator: bool) -> Result<(), NickRejection> {
    if name.contains(FORBIDDEN_CHARS) {
        return Err(NickRejection::InvalidCharacters);
    }
    if require_separator && !name.contains(SEPARATOR) {
        return Err(NickRejection::MissingSeparator);
    }
    Ok(())
}

/// Full validation for a nick proposed by a local client.
pub fn validate(name: &str, require_separator: bool) -> Result<(), NickRejection> {
    check_format(name, require_separator)?;
    if name.len() > MAX_SPOOFED_NICK_LEN {
        return Err(NickRejection::TooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_separated_nick() {
        assert_eq!(validate("alice/web", true), Ok(()));
        assert_eq!(validate("alice/web", false), Ok(()));
    }

    #[test]
    fn separator_only_required_when_enabled() {
        assert_eq!(validate("alice", true), Err(NickRejection::MissingSeparator));
        assert_eq!(validate("alice", false), Ok(()));
    }

    #[test]
    fn each_forbidden_char_rejected() {
        for c in FORBIDDEN_CHARS {
            let name = format!("a{c}b/c");
            assert_eq!(
                validate(&name, false),
                Err(NickRejection::InvalidCharacters),
                "{name:?}"
            );
        }
    }

    #[test]
    fn characters_checked_before_separator_and_length() {
        let long_bad = format!("{}!", "x".repeat(50));
        assert_eq!(validate(&long_bad, true), Err(NickRejection::InvalidCharacters));
    }

    #[test]
    fn separator_checked_before_length() {
        let long = "x".repeat(50);
        assert_eq!(validate(&long, true), Err(NickRejection::MissingSeparator));
        assert_eq!(validate(&long, false), Err(NickRejection::TooLong));
    }

    #[test]
    fn length_is_counted_in_bytes() {
        let name = format!("{}/", "\u{20ac}".repeat(11));
        assert_eq!(name.len(), 34);
        assert_eq!(validate(&name, true), Ok(()));
        // 12 characters, 36 bytes.
        let name = "\u{20ac}".repeat(12);
        assert_eq!(validate(&name, false), Err(NickRejection::TooLong));
    }

    #[test]
    fn check_format_ignores_length() {
        let long = format!("{}/x", "y".repeat(60));
        assert_eq!(check_format(&long, true), Ok(()));
        assert_eq!(validate(&long, true), Err(NickRejection::TooLong));
    }

    #[test]
    fn empty_name_passes_when_separator_off() {
        assert_eq!(validate("", false), Ok(()));
        assert_eq!(validate("", true), Err(NickRejection::MissingSeparator));
    }
}
