//! The top-level message view and dotted-path queries.

use tracing::trace;

use crate::delimiters::Delimiters;
use crate::error::{Hl7Error, Hl7Result, Level};
use crate::query::{next_term, segment_term};
use crate::segment::Segment;
use crate::split::{split_segments, Ranges};

/// A parsed view of one HL7 v2 message.
///
/// Borrows the message text and keeps only the delimiter set and the
/// segment ranges; nothing is copied. Views are cheap enough to rebuild per
/// use, and every value they hand out borrows the original buffer.
///
/// # Example
///
/// ```rust
/// use fast_hl7::Message;
///
/// let text = "MSH|^~\\&|App|Fac|||20231010||ADT^A01|MSG001|P|2.5\rPID|1||123^^^MRN||Doe^John";
/// let message = Message::parse(text).unwrap();
///
/// assert_eq!(message.query("MSH.10").unwrap(), "MSG001");
/// assert_eq!(message.query("PID.5.2").unwrap(), "John");
/// assert_eq!(message.query("ZZZ.1").unwrap(), "");
/// ```
#[derive(Debug, Clone)]
pub struct Message<'a> {
    text: &'a str,
    delimiters: Delimiters,
    segments: Ranges,
}

impl<'a> Message<'a> {
    /// Reads the delimiter set and segment layout of `text`.
    ///
    /// # Errors
    ///
    /// Returns a format error if the text does not start with a complete
    /// `MSH` header (see [`Delimiters::parse`]).
    pub fn parse(text: &'a str) -> Hl7Result<Self> {
        let delimiters = Delimiters::parse(text)?;
        let segments = split_segments(text);
        trace!(segments = segments.len(), bytes = text.len(), "parsed HL7 message");

        Ok(Self {
            text,
            delimiters,
            segments,
        })
    }

    /// The raw message text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The delimiter set declared by the header.
    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    /// Number of non-empty segment lines.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// The segment at 0-based position `i`. `MSH` is always position 0.
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::IndexOutOfRange`] if `i` is not below
    /// [`segment_count`](Self::segment_count).
    pub fn segment(&self, i: usize) -> Hl7Result<Segment<'a>> {
        let range = self
            .segments
            .get(i)
            .ok_or_else(|| Hl7Error::out_of_range(Level::Segment, i, self.segments.len()))?;
        Ok(Segment::new(&self.text[range.clone()], self.delimiters))
    }

    /// Looks a segment up by name, optionally with a 1-based repeat: `PID`,
    /// `OBX(3)`.
    ///
    /// Names are matched as a case-insensitive prefix of each line, in
    /// message order. A name that matches nothing returns a segment whose
    /// [`has_value`](Segment::has_value) is false rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::MalformedQuery`] if the repeat specifier is not a
    /// number in balanced parentheses.
    pub fn segment_by_name(&self, name: &str) -> Hl7Result<Segment<'a>> {
        let (name, repeat) = segment_term(name)?;

        let found = repeat.checked_sub(1).and_then(|skip| {
            self.lines()
                .filter(|line| starts_with_ignore_case(line, name))
                .nth(skip)
        });

        Ok(match found {
            Some(line) => Segment::new(line, self.delimiters),
            None => Segment::absent(self.delimiters),
        })
    }

    /// Iterates over the segments in message order.
    pub fn segments(&self) -> impl Iterator<Item = Segment<'a>> + '_ {
        let delimiters = self.delimiters;
        self.lines().map(move |line| Segment::new(line, delimiters))
    }

    /// Resolves a dotted query such as `PID(2).3(1).4.2`.
    ///
    /// The first term names a segment. If that is the only term, or the
    /// segment is missing, the segment's text (possibly empty) is returned;
    /// otherwise the rest of the path is handed to [`Segment::query`].
    ///
    /// # Errors
    ///
    /// Format errors for malformed terms, index errors for positions that do
    /// not exist in a segment that does.
    pub fn query(&self, path: &str) -> Hl7Result<&'a str> {
        let (term, rest) = next_term(path);
        let segment = self.segment_by_name(term)?;

        match rest {
            Some(rest) if segment.has_value() => segment.query(rest),
            _ => Ok(segment.value()),
        }
    }

    fn lines(&self) -> impl Iterator<Item = &'a str> + '_ {
        let text = self.text;
        self.segments.iter().map(move |range| &text[range.clone()])
    }
}

fn starts_with_ignore_case(line: &str, prefix: &str) -> bool {
    line.len() >= prefix.len() && line.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
