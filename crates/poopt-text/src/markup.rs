//! Typed view of the format markers embedded in message text.
//!
//! The chat client writes formatting as markers:
//!
//! | Marker            | Meaning                   |
//! |-------------------|---------------------------|
//! | `\x19o`           | reset all attributes      |
//! | `\x19b`           | bold                      |
//! | `\x19i`           | italic                    |
//! | `\x19u`           | underline                 |
//! | `\x19a`           | blink                     |
//! | `\x19<fg>}`       | foreground colour         |
//! | `\x19<fg>,<bg>}`  | foreground and background |
//!
//! Colours are curses colour numbers and may be negative (`-1` is the
//! terminal default). Marker boundaries come from [`crate::marker`], so this
//! module and the wrapper always agree on where a marker ends.

use std::borrow::Cow;

use bitflags::bitflags;

use crate::marker::{MARKER_INTRODUCER, scan_marker};

bitflags! {
    /// Text attributes a directive can switch on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attrs: u8 {
        const BOLD = 0b0001;
        const ITALIC = 0b0010;
        const UNDERLINE = 0b0100;
        const BLINK = 0b1000;
    }
}

/// A parsed format marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Reset every attribute and colour.
    Reset,
    /// Switch on one attribute.
    Attr(Attrs),
    /// Set the foreground colour, and optionally the background.
    Colour { fg: i16, bg: Option<i16> },
}

impl Directive {
    /// Attributes switched on by this directive.
    #[must_use]
    pub fn attrs(&self) -> Attrs {
        match self {
            Self::Attr(attrs) => *attrs,
            Self::Reset | Self::Colour { .. } => Attrs::empty(),
        }
    }
}

/// A run of message text or a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Printable text.
    Text(&'a str),
    /// A marker that parsed.
    Directive(Directive),
    /// A marker that did not parse, kept verbatim.
    Unknown(&'a str),
}

/// Parse one complete marker, introducer included.
#[must_use]
pub fn parse_directive(marker: &[u8]) -> Option<Directive> {
    let (&intro, body) = marker.split_first()?;
    if intro != MARKER_INTRODUCER {
        return None;
    }
    match body {
        b"o" => Some(Directive::Reset),
        b"b" => Some(Directive::Attr(Attrs::BOLD)),
        b"i" => Some(Directive::Attr(Attrs::ITALIC)),
        b"u" => Some(Directive::Attr(Attrs::UNDERLINE)),
        b"a" => Some(Directive::Attr(Attrs::BLINK)),
        _ => parse_colour(body.strip_suffix(b"}")?),
    }
}

fn parse_colour(body: &[u8]) -> Option<Directive> {
    let body = std::str::from_utf8(body).ok()?;
    let (fg, bg) = match body.split_once(',') {
        Some((fg, bg)) => (fg, Some(bg)),
        None => (body, None),
    };
    Some(Directive::Colour {
        fg: fg.parse().ok()?,
        bg: bg.map(str::parse).transpose().ok()?,
    })
}

/// Split `text` into text runs and markers.
#[must_use]
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let Some(offset) = bytes[cursor..].iter().position(|&b| b == MARKER_INTRODUCER) else {
            out.push(Segment::Text(&text[cursor..]));
            break;
        };
        let start = cursor + offset;
        if start > cursor {
            out.push(Segment::Text(&text[cursor..start]));
        }
        // Terminators are ASCII, so `end` is always a char boundary.
        let end = start + scan_marker(bytes, start).len;
        out.push(match parse_directive(&bytes[start..end]) {
            Some(directive) => Segment::Directive(directive),
            None => Segment::Unknown(&text[start..end]),
        });
        cursor = end;
    }

    out
}

/// `text` with every marker removed.
#[must_use]
pub fn strip_markers(text: &str) -> Cow<'_, str> {
    if !text.as_bytes().contains(&MARKER_INTRODUCER) {
        return Cow::Borrowed(text);
    }
    let stripped: String = segments(text)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Text(run) => Some(run),
            Segment::Directive(_) | Segment::Unknown(_) => None,
        })
        .collect();
    Cow::Owned(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letter_directives() {
        assert_eq!(parse_directive(b"\x19o"), Some(Directive::Reset));
        assert_eq!(parse_directive(b"\x19b"), Some(Directive::Attr(Attrs::BOLD)));
        assert_eq!(parse_directive(b"\x19i"), Some(Directive::Attr(Attrs::ITALIC)));
        assert_eq!(
            parse_directive(b"\x19u"),
            Some(Directive::Attr(Attrs::UNDERLINE))
        );
        assert_eq!(parse_directive(b"\x19a"), Some(Directive::Attr(Attrs::BLINK)));
    }

    #[test]
    fn colour_directives() {
        assert_eq!(
            parse_directive(b"\x191}"),
            Some(Directive::Colour { fg: 1, bg: None })
        );
        assert_eq!(
            parse_directive(b"\x1933,41}"),
            Some(Directive::Colour {
                fg: 33,
                bg: Some(41)
            })
        );
        assert_eq!(
            parse_directive(b"\x19-1,-1}"),
            Some(Directive::Colour {
                fg: -1,
                bg: Some(-1)
            })
        );
    }

    #[test]
    fn rejects_malformed_markers() {
        assert_eq!(parse_directive(b""), None);
        assert_eq!(parse_directive(b"o"), None);
        assert_eq!(parse_directive(b"\x19"), None);
        assert_eq!(parse_directive(b"\x19x}"), None);
        assert_eq!(parse_directive(b"\x1912"), None);
        assert_eq!(parse_directive(b"\x191,2,3}"), None);
    }

    #[test]
    fn directive_attrs() {
        assert_eq!(Directive::Attr(Attrs::BOLD).attrs(), Attrs::BOLD);
        assert!(Directive::Reset.attrs().is_empty());
    }

    #[test]
    fn segments_of_formatted_message() {
        assert_eq!(
            segments("\x19bHello \x1912}world!\x19o"),
            vec![
                Segment::Directive(Directive::Attr(Attrs::BOLD)),
                Segment::Text("Hello "),
                Segment::Directive(Directive::Colour { fg: 12, bg: None }),
                Segment::Text("world!"),
                Segment::Directive(Directive::Reset),
            ]
        );
    }

    #[test]
    fn long_form_marker_is_unknown() {
        // The attribute letter ends the marker before the brace.
        assert_eq!(
            segments("\x1933,41,b}x"),
            vec![Segment::Unknown("\x1933,41,b"), Segment::Text("}x")]
        );
    }

    #[test]
    fn plain_text_is_one_segment() {
        assert_eq!(segments("héllo"), vec![Segment::Text("héllo")]);
        assert!(segments("").is_empty());
    }

    #[test]
    fn strip_markers_borrows_when_clean() {
        assert!(matches!(strip_markers("plain"), Cow::Borrowed("plain")));
        assert_eq!(strip_markers("\x19bbold\x19o and \x191}red"), "bold and red");
        assert_eq!(strip_markers("tail\x1912"), "tail");
    }
}
