//! Term grammar for dotted query paths.
//!
//! ```text
//! path          := segment_term ["." field_term ["." component ["." sub_component]]]
//! segment_term  := NAME | NAME "(" repeat ")"
//! field_term    := index | index "(" repeat ")"
//! ```
//!
//! Each level of the hierarchy consumes its own term and hands the rest of
//! the path down unchanged, so these helpers only ever look at one term.

use crate::error::{Hl7Error, Hl7Result, Level};
use crate::split::{extract_paren_int, parse_index};

/// Splits off the first dot-separated term, returning it and the remainder.
pub(crate) fn next_term(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}

/// Parses `NAME` or `NAME(repeat)`. The repeat defaults to 1.
pub(crate) fn segment_term(term: &str) -> Hl7Result<(&str, usize)> {
    match term.find('(') {
        None => Ok((term, 1)),
        Some(paren) => {
            let repeat = extract_paren_int(term).ok_or_else(|| {
                Hl7Error::malformed_query(term, "expected SEGMENT_NAME or SEGMENT_NAME(repeat)")
            })?;
            Ok((&term[..paren], repeat))
        }
    }
}

/// Parses `index` or `index(repeat)`.
pub(crate) fn field_term(term: &str) -> Hl7Result<(usize, Option<usize>)> {
    let (head, repeat) = match term.find('(') {
        None => (term, None),
        Some(paren) => {
            let repeat = extract_paren_int(term).ok_or_else(|| {
                Hl7Error::malformed_query(term, "expected FIELD_INDEX or FIELD_INDEX(repeat)")
            })?;
            (&term[..paren], Some(repeat))
        }
    };

    let index = parse_index(head)
        .ok_or_else(|| Hl7Error::malformed_query(term, "field index must be numeric"))?;
    Ok((index, repeat))
}

/// Parses a 1-based component or sub-component index.
pub(crate) fn position_term(term: &str, level: Level) -> Hl7Result<usize> {
    parse_index(term).ok_or_else(|| Hl7Error::invalid_index(level, term))
}
