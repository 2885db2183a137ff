//! HL7 escape sequence decoding.
//!
//! Escape sequences are delimited by the message's escape character
//! (normally `\`). Decoding is the only operation in this crate that has to
//! allocate, because the decoded text is shorter than the source. Check
//! [`requires_unescaping`] first, or rely on [`unescape`] returning
//! [`Cow::Borrowed`] when there is nothing to decode.
//!
//! | Sequence | Output |
//! |----------|--------|
//! | `\F\` | field delimiter |
//! | `\S\` | component delimiter |
//! | `\T\` | sub-component delimiter |
//! | `\R\` | repeat delimiter |
//! | `\E\` | escape character |
//! | `\.br\` | [`LINE_BREAK`] |
//! | `\Xhhhh..\` | the hex-encoded bytes, read as UTF-8 |
//! | `\H\`, `\N\`, `\Z..\` | left untouched, delimiters included |
//! | anything else | the sequence text without its delimiters |
//!
//! `\C..\` and `\M..\` character set switches are not interpreted.

use std::borrow::Cow;

use smallvec::SmallVec;
use tracing::debug;

use crate::delimiters::Delimiters;

/// Replacement text for the `.br` line break sequence.
pub const LINE_BREAK: &str = "\n";

/// Returns true if `text` contains the escape character and so needs decoding.
///
/// This never allocates.
pub fn requires_unescaping(text: &str, delimiters: &Delimiters) -> bool {
    !text.is_empty() && text.contains(delimiters.escape_character())
}

/// Decodes the escape sequences in `text`.
///
/// A single left-to-right pass; decoded output is never re-scanned. An
/// escape character with no closing partner is kept along with the rest of
/// the text rather than treated as an error.
///
/// ```rust
/// use fast_hl7::{escape::unescape, Delimiters};
///
/// let delimiters = Delimiters::default();
/// assert_eq!(unescape(r"Obstetrician \T\ Gynaecologist", &delimiters), "Obstetrician & Gynaecologist");
/// assert_eq!(unescape(r"c:\E\temp\E\file.txt", &delimiters), r"c:\temp\file.txt");
/// ```
pub fn unescape<'a>(text: &'a str, delimiters: &Delimiters) -> Cow<'a, str> {
    if !requires_unescaping(text, delimiters) {
        return Cow::Borrowed(text);
    }

    let escape = delimiters.escape_character();
    let width = escape.len_utf8();
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    loop {
        let Some(start) = rest.find(escape) else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..start]);

        let after = &rest[start + width..];
        let Some(end) = after.find(escape) else {
            // unterminated: keep the escape character and everything after it
            out.push_str(&rest[start..]);
            break;
        };

        let sequence = &after[..end];
        rest = &after[end + width..];

        match sequence {
            "F" => out.push(delimiters.field_delimiter()),
            "S" => out.push(delimiters.component_delimiter()),
            "T" => out.push(delimiters.sub_component_delimiter()),
            "R" => out.push(delimiters.repeat_delimiter()),
            "E" => out.push(escape),
            ".br" => out.push_str(LINE_BREAK),
            _ => match sequence.chars().next() {
                Some('X') => match decode_hex(&sequence[1..]) {
                    Some(decoded) => out.push_str(&decoded),
                    None => {
                        debug!(sequence, "passing through undecodable hex escape");
                        push_verbatim(&mut out, sequence, escape);
                    }
                },
                Some('H' | 'N' | 'Z') => push_verbatim(&mut out, sequence, escape),
                _ => out.push_str(sequence),
            },
        }
    }

    Cow::Owned(out)
}

fn push_verbatim(out: &mut String, sequence: &str, escape: char) {
    out.push(escape);
    out.push_str(sequence);
    out.push(escape);
}

/// Decodes pairs of hex digits into text.
///
/// One byte, or two bytes with a leading zero, name a code point directly
/// (`A2` and `00A2` are both `¢`). Anything longer is read as UTF-8, with
/// invalid sequences replaced by U+FFFD. A trailing odd digit is ignored.
/// Returns `None` if a non-hex character is present.
pub(crate) fn decode_hex(hex: &str) -> Option<String> {
    let digits = hex.as_bytes();
    let mut bytes: SmallVec<[u8; 32]> = SmallVec::with_capacity(digits.len() / 2);
    for pair in digits.chunks_exact(2) {
        let hi = hex_value(pair[0])?;
        let lo = hex_value(pair[1])?;
        bytes.push((hi << 4) | lo);
    }

    match bytes.as_slice() {
        [single] | [0, single] => Some(char::from(*single).to_string()),
        _ => Some(String::from_utf8_lossy(&bytes).into_owned()),
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        _ => None,
    }
}
