//! Field views: repeats, components and sub-components.

use std::borrow::Cow;

use crate::delimiters::Delimiters;
use crate::error::{Hl7Error, Hl7Result, Level};
use crate::escape;
use crate::query::{next_term, position_term};
use crate::split::{split, Ranges};

/// A view of one field's text.
///
/// Component ranges of the first (or only) repeat are split once when the
/// field is created. Other repeats and sub-components are split on demand.
/// Every accessor returns a slice of the original message buffer.
///
/// Component and sub-component positions are 1-based.
///
/// # Example
///
/// ```rust
/// use fast_hl7::{Delimiters, Field};
///
/// let field = Field::new("Doe^John^Q", Delimiters::default());
/// assert_eq!(field.component_count(), 3);
/// assert_eq!(field.component(2).unwrap(), "John");
/// assert_eq!(field.query("1").unwrap(), "Doe");
/// ```
#[derive(Debug, Clone)]
pub struct Field<'a> {
    value: &'a str,
    delimiters: Delimiters,
    components: Ranges,
}

impl<'a> Field<'a> {
    /// Creates a field view over `value`.
    pub fn new(value: &'a str, delimiters: Delimiters) -> Self {
        let first_repeat = match value.find(delimiters.repeat_delimiter()) {
            Some(end) => &value[..end],
            None => value,
        };
        Self {
            value,
            delimiters,
            components: split(first_repeat, delimiters.component_delimiter()),
        }
    }

    /// The raw, still escaped text of the field, all repeats included.
    pub fn value(&self) -> &'a str {
        self.value
    }

    /// The delimiter set of the owning message.
    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    /// True if the field text is non-empty.
    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }

    /// True if the field text contains the repeat delimiter.
    pub fn has_repeats(&self) -> bool {
        self.value.contains(self.delimiters.repeat_delimiter())
    }

    /// Number of (possibly empty) repeats. A field without repeat delimiters
    /// has one.
    pub fn repeat_count(&self) -> usize {
        self.value.matches(self.delimiters.repeat_delimiter()).count() + 1
    }

    /// The 1-based `n`-th repeat as a field of its own.
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::IndexOutOfRange`] if `n` is 0 or exceeds
    /// [`repeat_count`](Self::repeat_count).
    pub fn repeat(&self, n: usize) -> Hl7Result<Field<'a>> {
        let text = nth_part(self.value, self.delimiters.repeat_delimiter(), n, Level::Repeat)?;
        Ok(Field::new(text, self.delimiters))
    }

    /// Iterates over the repeats in order.
    pub fn repeats(&self) -> impl Iterator<Item = Field<'a>> + 'a {
        let delimiters = self.delimiters;
        self.value
            .split(delimiters.repeat_delimiter())
            .map(move |text| Field::new(text, delimiters))
    }

    /// Number of (possibly empty) components in the first repeat.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// The 1-based `i`-th component of the first repeat.
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::IndexOutOfRange`] if `i` is 0 or exceeds
    /// [`component_count`](Self::component_count).
    pub fn component(&self, i: usize) -> Hl7Result<&'a str> {
        if i == 0 || i > self.components.len() {
            return Err(Hl7Error::out_of_range(Level::Component, i, self.components.len()));
        }
        Ok(&self.value[self.components[i - 1].clone()])
    }

    /// The 1-based `sub`-th sub-component of the 1-based `component`.
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::IndexOutOfRange`] if either position is out of
    /// range.
    pub fn sub_component(&self, component: usize, sub: usize) -> Hl7Result<&'a str> {
        let text = self.component(component)?;
        nth_part(text, self.delimiters.sub_component_delimiter(), sub, Level::SubComponent)
    }

    /// Resolves `component[.sub_component]` against the first repeat.
    ///
    /// Repeats are chosen when the field is selected (`9(2)` in a segment
    /// query); a field holding several repeats answers from the first one.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::Index`](crate::ErrorKind::Index) error if a
    /// term is not a number, is out of range, or there are too many terms.
    pub fn query(&self, path: &str) -> Hl7Result<&'a str> {
        let (term, rest) = next_term(path);
        let text = self.component(position_term(term, Level::Component)?)?;

        let Some(sub_path) = rest else {
            return Ok(text);
        };
        let (sub_term, extra) = next_term(sub_path);
        if extra.is_some() {
            return Err(Hl7Error::invalid_index(Level::SubComponent, sub_path));
        }
        let sub = position_term(sub_term, Level::SubComponent)?;
        nth_part(text, self.delimiters.sub_component_delimiter(), sub, Level::SubComponent)
    }

    /// The field text with escape sequences decoded.
    pub fn unescaped(&self) -> Cow<'a, str> {
        escape::unescape(self.value, &self.delimiters)
    }

    /// Decodes the field as an HL7 `DT` value.
    ///
    /// # Errors
    ///
    /// See [`parse_date`](crate::datetime::parse_date).
    #[cfg(feature = "datetime")]
    pub fn as_date(&self) -> Hl7Result<Option<chrono::NaiveDate>> {
        crate::datetime::parse_date(self.value)
    }

    /// Decodes the field as an HL7 `DTM` value.
    ///
    /// # Errors
    ///
    /// See [`parse_date_time`](crate::datetime::parse_date_time).
    #[cfg(feature = "datetime")]
    pub fn as_date_time(&self) -> Hl7Result<Option<chrono::DateTime<chrono::FixedOffset>>> {
        crate::datetime::parse_date_time(self.value)
    }
}

/// Returns the 1-based `n`-th `delimiter`-separated part of `text`.
fn nth_part(text: &str, delimiter: char, n: usize, level: Level) -> Hl7Result<&str> {
    let parts = split(text, delimiter);
    if n == 0 || n > parts.len() {
        return Err(Hl7Error::out_of_range(level, n, parts.len()));
    }
    Ok(&text[parts[n - 1].clone()])
}
