//! Segment views and MSH field numbering.

use crate::delimiters::{Delimiters, HEADER_SEGMENT};
use crate::error::{Hl7Error, Hl7Result, Level};
use crate::field::Field;
use crate::query::{field_term, next_term};
use crate::split::{split, Ranges};

/// A view of one segment (line) of a message.
///
/// Field 0 is the segment name. The `MSH` header is numbered the HL7 way:
/// MSH-1 is the field delimiter itself, MSH-2 the encoding characters, and
/// every later field sits one position higher than a plain split would put
/// it.
///
/// # Example
///
/// ```rust
/// use fast_hl7::{Delimiters, Segment};
///
/// let text = "MSH|^~\\&|SendingApp|SendingFac";
/// let msh = Segment::new(text, Delimiters::parse(text).unwrap());
/// assert_eq!(msh.field(1).unwrap().value(), "|");
/// assert_eq!(msh.field(2).unwrap().value(), "^~\\&");
/// assert_eq!(msh.field(3).unwrap().value(), "SendingApp");
/// ```
#[derive(Debug, Clone)]
pub struct Segment<'a> {
    value: &'a str,
    delimiters: Delimiters,
    fields: Ranges,
}

impl<'a> Segment<'a> {
    /// Creates a segment view over one line of message text.
    pub fn new(value: &'a str, delimiters: Delimiters) -> Self {
        Self {
            value,
            delimiters,
            fields: split(value, delimiters.field_delimiter()),
        }
    }

    /// The empty segment returned for a by-name lookup that finds nothing.
    pub(crate) fn absent(delimiters: Delimiters) -> Self {
        Self {
            value: "",
            delimiters,
            fields: Ranges::new(),
        }
    }

    /// The raw text of the segment.
    pub fn value(&self) -> &'a str {
        self.value
    }

    /// False for the absent segment of a missed by-name lookup.
    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }

    /// The delimiter set of the owning message.
    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    /// The first three characters of the segment.
    ///
    /// A segment shorter than three bytes returns its whole text.
    pub fn name(&self) -> &'a str {
        self.value.get(..3).unwrap_or(self.value)
    }

    /// True for the `MSH` header segment.
    pub fn is_header(&self) -> bool {
        self.name().eq_ignore_ascii_case(HEADER_SEGMENT)
    }

    /// Number of addressable fields, the name at index 0 included.
    ///
    /// For `MSH` this is one more than the number of delimited parts, since
    /// MSH-1 has no text of its own.
    pub fn field_count(&self) -> usize {
        if self.is_header() {
            self.fields.len() + 1
        } else {
            self.fields.len()
        }
    }

    /// The field at index `i`, where 0 is the segment name.
    ///
    /// A field with several repeats is returned whole.
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::IndexOutOfRange`] if `i` is not below
    /// [`field_count`](Self::field_count).
    pub fn field(&self, i: usize) -> Hl7Result<Field<'a>> {
        let count = self.field_count();
        if i >= count {
            return Err(Hl7Error::out_of_range(Level::Field, i, count));
        }

        if !self.is_header() {
            return Ok(self.part(i));
        }
        match i {
            0 => Ok(self.part(0)),
            1 => Ok(Field::new(self.field_separator(), self.delimiters)),
            _ => Ok(self.part(i - 1)),
        }
    }

    /// The 1-based `repeat` of the field at index `index`.
    ///
    /// Uses the same numbering as [`field`](Self::field), MSH included.
    /// MSH-1 and MSH-2 hold delimiters rather than data, so they only have
    /// a first repeat.
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::IndexOutOfRange`] if the field does not exist,
    /// `repeat` is 0, or the field has fewer repeats.
    pub fn field_repeat(&self, index: usize, repeat: usize) -> Hl7Result<Field<'a>> {
        let field = self.field(index)?;
        if self.is_header() && (index == 1 || index == 2) {
            if repeat != 1 {
                return Err(Hl7Error::out_of_range(Level::Repeat, repeat, 1));
            }
            return Ok(field);
        }
        field.repeat(repeat)
    }

    /// Iterates over every field in index order, starting with the name.
    pub fn fields(&self) -> impl Iterator<Item = Field<'a>> + '_ {
        (0..self.field_count()).filter_map(move |i| self.field(i).ok())
    }

    /// Resolves `field[(repeat)][.component[.sub_component]]`.
    ///
    /// ```rust
    /// use fast_hl7::{Delimiters, Segment};
    ///
    /// let pid = Segment::new("PID|1||123^^^MRN~456^^^SSN||Doe^John", Delimiters::default());
    /// assert_eq!(pid.query("5.2").unwrap(), "John");
    /// assert_eq!(pid.query("3(2).4").unwrap(), "SSN");
    /// assert_eq!(pid.query("0").unwrap(), "PID");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::MalformedQuery`] if the field term is not `int` or
    /// `int(int)`, and index errors for anything out of range.
    pub fn query(&self, path: &str) -> Hl7Result<&'a str> {
        let (term, rest) = next_term(path);
        let (index, repeat) = field_term(term)?;

        let field = match repeat {
            Some(repeat) => self.field_repeat(index, repeat)?,
            None => self.field(index)?,
        };

        match rest {
            Some(rest) => field.query(rest),
            None => Ok(field.value()),
        }
    }

    fn part(&self, i: usize) -> Field<'a> {
        Field::new(&self.value[self.fields[i].clone()], self.delimiters)
    }

    /// The field delimiter as it appears after the segment name.
    fn field_separator(&self) -> &'a str {
        let end = self.fields.first().map_or(0, |name| name.end);
        let width = self.delimiters.field_delimiter().len_utf8();
        self.value.get(end..end + width).unwrap_or("")
    }
}
