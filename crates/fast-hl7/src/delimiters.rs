//! The per-message delimiter set declared by the MSH header.

use crate::error::{Hl7Error, Hl7Result};

/// Segment name every message must start with.
pub const HEADER_SEGMENT: &str = "MSH";

/// The five delimiter characters a message declares in `MSH-1` and `MSH-2`.
///
/// HL7 allows each message to pick its own delimiters, although almost every
/// sender uses the standard `|^~\&`. The set is read from the fixed character
/// offsets 3 through 7 of the message and never changes afterwards.
///
/// # Example
///
/// ```rust
/// use fast_hl7::Delimiters;
///
/// let delimiters = Delimiters::parse("MSH|^~\\&|SendingApp").unwrap();
/// assert_eq!(delimiters.field_delimiter(), '|');
/// assert_eq!(delimiters.sub_component_delimiter(), '&');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delimiters {
    field: char,
    component: char,
    repeat: char,
    escape: char,
    sub_component: char,
}

impl Delimiters {
    /// Reads the delimiter set from the start of a message.
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::MissingHeader`] if the text does not begin with
    /// `MSH` (case-sensitive) and [`Hl7Error::TruncatedHeader`] if it holds
    /// fewer than 8 characters.
    pub fn parse(message: &str) -> Hl7Result<Self> {
        let mut chars = message.chars();
        let mut header = ['\0'; 8];
        let mut found = 0;
        for slot in header.iter_mut() {
            match chars.next() {
                Some(c) => {
                    *slot = c;
                    found += 1;
                }
                None => break,
            }
        }

        if !message.starts_with(HEADER_SEGMENT) {
            return Err(Hl7Error::MissingHeader);
        }
        if found < header.len() {
            return Err(Hl7Error::TruncatedHeader(found));
        }

        Ok(Self {
            field: header[3],
            component: header[4],
            repeat: header[5],
            escape: header[6],
            sub_component: header[7],
        })
    }

    /// Separates fields within a segment (`|`).
    pub const fn field_delimiter(&self) -> char {
        self.field
    }

    /// Separates components within a field (`^`).
    pub const fn component_delimiter(&self) -> char {
        self.component
    }

    /// Separates repeats within a field (`~`).
    pub const fn repeat_delimiter(&self) -> char {
        self.repeat
    }

    /// Opens and closes escape sequences (`\`).
    pub const fn escape_character(&self) -> char {
        self.escape
    }

    /// Separates sub-components within a component (`&`).
    pub const fn sub_component_delimiter(&self) -> char {
        self.sub_component
    }

    /// The four encoding characters in MSH-2 order (`^~\&`).
    pub fn encoding_characters(&self) -> [char; 4] {
        [self.component, self.repeat, self.escape, self.sub_component]
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            field: '|',
            component: '^',
            repeat: '~',
            escape: '\\',
            sub_component: '&',
        }
    }
}
