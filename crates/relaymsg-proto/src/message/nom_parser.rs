//! Nom-based IRC line parser.
//!
//! Produces a borrowed [`ParsedMessage`] that [`super::parse`] turns into an
//! owned [`super::Message`].

use nom::{
    bytes::complete::{take_until, take_while1},
    character::complete::{char, space0},
    combinator::opt,
    error::ErrorKind,
    sequence::preceded,
    IResult,
};
use smallvec::SmallVec;

fn parse_tags(input: &str) -> IResult<&str, &str> {
    preceded(char('@'), take_until(" "))(input)
}

fn parse_prefix(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

/// Parse the command name (1*letter or 3digit).
fn parse_command(input: &str) -> IResult<&str, &str> {
    let (rest, cmd) = take_while1(|c: char| c.is_alphanumeric())(input)?;

    let is_all_letters = cmd.chars().all(|c| c.is_ascii_alphabetic());
    let is_three_digits = cmd.len() == 3 && cmd.chars().all(|c| c.is_ascii_digit());

    if is_all_letters || is_three_digits {
        Ok((rest, cmd))
    } else {
        Err(nom::Err::Error(nom::error::Error::new(
            input,
            ErrorKind::AlphaNumeric,
        )))
    }
}

/// Split the parameter list, honouring the `:` trailing parameter.
///
/// Consecutive spaces count as one separator. At most 15 parameters are kept.
fn parse_params(input: &str) -> (&str, SmallVec<[&str; 15]>) {
    let mut params: SmallVec<[&str; 15]> = SmallVec::new();
    let mut rest = input;

    while let Some(b' ') = rest.as_bytes().first().copied() {
        if params.len() >= 15 {
            break;
        }

        while rest.as_bytes().first() == Some(&b' ') {
            rest = &rest[1..];
        }

        if rest.is_empty() || rest.starts_with('\r') || rest.starts_with('\n') {
            break;
        }

        if let Some(b':') = rest.as_bytes().first().copied() {
            let after_colon = &rest[1..];
            let end = after_colon.find(['\r', '\n']).unwrap_or(after_colon.len());
            params.push(&after_colon[..end]);
            rest = &after_colon[end..];
            break;
        }

        let end = rest.find([' ', '\r', '\n']).unwrap_or(rest.len());
        let param = &rest[..end];
        if param.is_empty() {
            break;
        }
        params.push(param);
        rest = &rest[end..];
    }

    (rest, params)
}

/// `[@tags] [:prefix] <command> [params...] [:trailing]`
fn parse_message(input: &str) -> IResult<&str, ParsedMessage<'_>> {
    let (input, tags) = opt(parse_tags)(input)?;
    let (input, _) = space0(input)?;

    let (input, prefix) = opt(parse_prefix)(input)?;
    let (input, _) = space0(input)?;

    let (input, command) = parse_command(input)?;
    let (rest, params) = parse_params(input);

    Ok((
        rest,
        ParsedMessage {
            tags,
            prefix,
            command,
            params,
        },
    ))
}

/// A parsed line holding slices into the input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedMessage<'a> {
    /// Raw tags string without the leading `@`.
    pub tags: Option<&'a str>,
    /// Raw prefix string without the leading `:`.
    pub prefix: Option<&'a str>,
    pub command: &'a str,
    pub params: SmallVec<[&'a str; 15]>,
}

impl<'a> ParsedMessage<'a> {
    pub fn parse(input: &'a str) -> Result<Self, DetailedParseError> {
        match parse_message(input) {
            Ok((_remaining, msg)) => Ok(msg),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(DetailedParseError {
                position: input.len() - e.input.len(),
                kind: e.code,
            }),
            Err(nom::Err::Incomplete(_)) => Err(DetailedParseError {
                position: input.len(),
                kind: ErrorKind::Eof,
            }),
        }
    }
}

/// Parse failure with the byte offset it happened at.
#[derive(Debug, Clone)]
pub(crate) struct DetailedParseError {
    pub position: usize,
    pub kind: ErrorKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relaymsg_line() {
        let parsed = ParsedMessage::parse("RELAYMSG #chat alice/web :hello there\r\n").unwrap();
        assert_eq!(parsed.command, "RELAYMSG");
        assert_eq!(parsed.params.as_slice(), &["#chat", "alice/web", "hello there"]);
        assert!(parsed.tags.is_none());
        assert!(parsed.prefix.is_none());
    }

    #[test]
    fn test_parse_tags_and_prefix() {
        let parsed =
            ParsedMessage::parse("@draft/relaymsg=bridge;msgid=x :irc.test RRELAYMSG a b c :d")
                .unwrap();
        assert_eq!(parsed.tags, Some("draft/relaymsg=bridge;msgid=x"));
        assert_eq!(parsed.prefix, Some("irc.test"));
        assert_eq!(parsed.params.len(), 4);
    }

    #[test]
    fn test_multiple_spaces_collapse() {
        let parsed = ParsedMessage::parse("RELAYMSG   #chat   nick   :x").unwrap();
        assert_eq!(parsed.params.as_slice(), &["#chat", "nick", "x"]);
    }

    #[test]
    fn test_empty_trailing_kept() {
        let parsed = ParsedMessage::parse("RELAYMSG #chat nick/x :").unwrap();
        assert_eq!(parsed.params.as_slice(), &["#chat", "nick/x", ""]);
    }

    #[test]
    fn test_mixed_command_rejected() {
        let err = ParsedMessage::parse("RELAY2 #chat").unwrap_err();
        assert_eq!(err.position, 0);
        assert_eq!(err.kind, ErrorKind::AlphaNumeric);
    }
}
