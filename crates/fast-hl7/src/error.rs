//! Error types for HL7 parsing and querying.

use std::fmt;

use thiserror::Error;

/// The level of the message hierarchy an index or query term addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// A segment (line) of the message.
    Segment,
    /// A field within a segment.
    Field,
    /// A repeat within a field.
    Repeat,
    /// A component within a field.
    Component,
    /// A sub-component within a component.
    SubComponent,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Segment => "segment",
            Level::Field => "field",
            Level::Repeat => "repeat",
            Level::Component => "component",
            Level::SubComponent => "sub-component",
        })
    }
}

/// Broad classification of an [`Hl7Error`].
///
/// `Format` means the input had the wrong shape; `Index` means the shape was
/// fine but the addressed data is not there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorKind {
    /// Malformed header, query syntax or date/time text.
    Format,
    /// An index or repeat number out of bounds.
    Index,
}

/// Errors that can occur while parsing or querying an HL7 message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Hl7Error {
    /// The text does not start with an `MSH` segment.
    #[error("message must start with an MSH segment")]
    MissingHeader,

    /// The header is too short to declare all five delimiters.
    #[error("message header too short: need at least 8 characters, found {0}")]
    TruncatedHeader(usize),

    /// A query term could not be parsed.
    #[error("malformed query term '{term}': {reason}")]
    MalformedQuery {
        /// The offending term.
        term: String,
        /// Why the term was rejected.
        reason: &'static str,
    },

    /// A component or sub-component index that is not a positive integer.
    #[error("invalid {level} index '{term}'")]
    InvalidIndex {
        /// Level the index addresses.
        level: Level,
        /// The offending text.
        term: String,
    },

    /// An index or repeat number outside the available range.
    #[error("{level} index {index} out of range ({count} available)")]
    IndexOutOfRange {
        /// Level the index addresses.
        level: Level,
        /// The requested index.
        index: usize,
        /// How many entries exist at that level.
        count: usize,
    },

    /// A DT or DTM value that cannot be decoded.
    #[error("invalid date/time value '{value}': {reason}")]
    InvalidDateTime {
        /// The raw field text.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl Hl7Error {
    /// Classifies this error as a format or an index failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Hl7Error::MissingHeader
            | Hl7Error::TruncatedHeader(_)
            | Hl7Error::MalformedQuery { .. }
            | Hl7Error::InvalidDateTime { .. } => ErrorKind::Format,
            Hl7Error::InvalidIndex { .. } | Hl7Error::IndexOutOfRange { .. } => ErrorKind::Index,
        }
    }

    /// Returns true for [`ErrorKind::Format`] errors.
    pub fn is_format_error(&self) -> bool {
        self.kind() == ErrorKind::Format
    }

    /// Returns true for [`ErrorKind::Index`] errors.
    pub fn is_index_error(&self) -> bool {
        self.kind() == ErrorKind::Index
    }

    pub(crate) fn malformed_query(term: &str, reason: &'static str) -> Self {
        Hl7Error::MalformedQuery {
            term: term.to_string(),
            reason,
        }
    }

    pub(crate) fn invalid_index(level: Level, term: &str) -> Self {
        Hl7Error::InvalidIndex {
            level,
            term: term.to_string(),
        }
    }

    pub(crate) fn out_of_range(level: Level, index: usize, count: usize) -> Self {
        Hl7Error::IndexOutOfRange {
            level,
            index,
            count,
        }
    }
}

/// Result type for HL7 operations.
pub type Hl7Result<T> = std::result::Result<T, Hl7Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_header() {
        assert_eq!(
            Hl7Error::MissingHeader.to_string(),
            "message must start with an MSH segment"
        );
    }

    #[test]
    fn test_error_display_out_of_range() {
        let err = Hl7Error::out_of_range(Level::SubComponent, 4, 2);
        assert_eq!(err.to_string(), "sub-component index 4 out of range (2 available)");
    }

    #[test]
    fn test_error_display_malformed_query() {
        let err = Hl7Error::malformed_query("PID)(a", "unbalanced parentheses");
        assert_eq!(
            err.to_string(),
            "malformed query term 'PID)(a': unbalanced parentheses"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(Hl7Error::TruncatedHeader(7).kind(), ErrorKind::Format);
        assert!(Hl7Error::malformed_query("x", "not a number").is_format_error());
        assert!(Hl7Error::invalid_index(Level::Component, "a").is_index_error());
        assert!(Hl7Error::out_of_range(Level::Field, 12, 12).is_index_error());
    }
}
