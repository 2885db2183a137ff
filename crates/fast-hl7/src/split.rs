//! Range-based splitting primitives.
//!
//! Nothing here copies message text. Each function returns half-open byte
//! ranges into the slice it was given; the views slice the original buffer
//! with them on demand.
//!
//! Results are collected into [`Ranges`], a `SmallVec` that keeps up to
//! [`INLINE_RANGES`] entries on the stack. Longer inputs spill to the heap
//! instead of being truncated, so there is no upper bound on part count.

use std::ops::Range;

use memchr::{memchr2_iter, memchr_iter};
use nom::{
    character::complete::digit1,
    combinator::{all_consuming, map_res},
    IResult,
};
use smallvec::SmallVec;

/// Number of ranges held inline before a split spills to the heap.
pub const INLINE_RANGES: usize = 32;

/// Ordered half-open byte ranges produced by a split.
pub type Ranges = SmallVec<[Range<usize>; INLINE_RANGES]>;

/// Splits `text` on every occurrence of `delimiter`, keeping empty parts.
///
/// Empty parts are significant in HL7: a missing field still occupies its
/// position. An empty `text` yields a single empty range.
///
/// ```rust
/// use fast_hl7::split::split;
///
/// let text = "a||c";
/// let parts: Vec<&str> = split(text, '|').into_iter().map(|r| &text[r]).collect();
/// assert_eq!(parts, ["a", "", "c"]);
/// ```
pub fn split(text: &str, delimiter: char) -> Ranges {
    let mut ranges = Ranges::new();
    let mut start = 0;

    if delimiter.is_ascii() {
        // An ASCII byte never occurs inside a multi-byte UTF-8 sequence.
        for end in memchr_iter(delimiter as u8, text.as_bytes()) {
            ranges.push(start..end);
            start = end + 1;
        }
    } else {
        let width = delimiter.len_utf8();
        for (end, _) in text.match_indices(delimiter) {
            ranges.push(start..end);
            start = end + width;
        }
    }

    ranges.push(start..text.len());
    ranges
}

/// Splits message text into segment lines.
///
/// `\r\n`, `\r` and `\n` are all accepted as terminators. Empty lines are
/// dropped so trailing or blank lines never produce phantom segments.
pub fn split_segments(text: &str) -> Ranges {
    let mut ranges = Ranges::new();
    let mut start = 0;

    for end in memchr2_iter(b'\r', b'\n', text.as_bytes()) {
        if end > start {
            ranges.push(start..end);
        }
        start = end + 1;
    }

    if text.len() > start {
        ranges.push(start..text.len());
    }
    ranges
}

/// Reads the integer between the first `(` and the first `)` of `text`.
///
/// Returns `None` when either parenthesis is missing, when the first `)`
/// comes before or right after the `(`, or when the text between them is
/// not an unsigned integer.
///
/// ```rust
/// use fast_hl7::split::extract_paren_int;
///
/// assert_eq!(extract_paren_int("PID(2)"), Some(2));
/// assert_eq!(extract_paren_int("PID()"), None);
/// assert_eq!(extract_paren_int("PID)(2)"), None);
/// assert_eq!(extract_paren_int("PID"), None);
/// ```
pub fn extract_paren_int(text: &str) -> Option<usize> {
    let open = text.find('(')?;
    let close = text.find(')')?;
    if close <= open + 1 {
        return None;
    }
    parse_index(&text[open + 1..close])
}

/// Parses a whole term as an unsigned decimal integer.
pub(crate) fn parse_index(term: &str) -> Option<usize> {
    all_consuming(unsigned)(term).ok().map(|(_, value)| value)
}

fn unsigned(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |digits: &str| digits.parse::<usize>())(input)
}
