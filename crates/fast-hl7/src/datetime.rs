//! Decoding of HL7 `DT` (date) and `DTM` (date/time) field values.
//!
//! Both types allow trailing precision to be left off. Missing months and
//! days become `1`, missing time parts become `0`, and a `DTM` without an
//! explicit offset is read as UTC. An empty value is not an error; it means
//! the field was not sent.
//!
//! | Type | Format |
//! |------|--------|
//! | `DT` | `YYYY[MM[DD]]` |
//! | `DTM` | `YYYY[MM[DD[HH[MM[SS[.S[S[S[S]]]]]]]]][+/-ZZZZ]` |

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};

use crate::error::{Hl7Error, Hl7Result};

/// Decodes a `DT` value.
///
/// ```rust
/// use chrono::NaiveDate;
/// use fast_hl7::datetime::parse_date;
///
/// assert_eq!(parse_date("202503").unwrap(), NaiveDate::from_ymd_opt(2025, 3, 1));
/// assert_eq!(parse_date("").unwrap(), None);
/// ```
///
/// # Errors
///
/// Returns [`Hl7Error::InvalidDateTime`] if the value is not 4, 6 or 8
/// digits or does not name a real calendar date.
pub fn parse_date(value: &str) -> Hl7Result<Option<NaiveDate>> {
    if value.is_empty() {
        return Ok(None);
    }
    if !matches!(value.len(), 4 | 6 | 8) {
        return Err(invalid(value, "expected 4, 6 or 8 digits"));
    }
    if !all_digits(value) {
        return Err(invalid(value, "expected only digits"));
    }

    calendar_date(value, value).map(Some)
}

/// Decodes a `DTM` value.
///
/// ```rust
/// use chrono::{FixedOffset, TimeZone};
/// use fast_hl7::datetime::parse_date_time;
///
/// let expected = FixedOffset::east_opt(5400)
///     .unwrap()
///     .with_ymd_and_hms(2023, 1, 2, 3, 4, 5)
///     .unwrap();
/// assert_eq!(parse_date_time("20230102030405+0130").unwrap(), Some(expected));
/// ```
///
/// # Errors
///
/// Returns [`Hl7Error::InvalidDateTime`] for a malformed value: a base that
/// is not 4 to 14 digits in pairs after the year, a fraction that is not 1
/// to 4 digits after full seconds, an offset that is not a sign plus four
/// digits, or any out-of-range date or time part.
pub fn parse_date_time(value: &str) -> Hl7Result<Option<DateTime<FixedOffset>>> {
    if value.is_empty() {
        return Ok(None);
    }

    let (body, offset) = match value.find(|c: char| c == '+' || c == '-') {
        Some(at) => (&value[..at], parse_offset(value, &value[at..])?),
        None => (value, utc()),
    };

    let (base, fraction) = match body.split_once('.') {
        Some((base, fraction)) => (base, Some(fraction)),
        None => (body, None),
    };

    if !matches!(base.len(), 4 | 6 | 8 | 10 | 12 | 14) {
        return Err(invalid(value, "expected 4 to 14 digits before any fraction or offset"));
    }
    if !all_digits(base) {
        return Err(invalid(value, "expected only digits"));
    }

    let date = calendar_date(value, base)?;
    let hour = digits_at(base, 8, 2).unwrap_or(0);
    let minute = digits_at(base, 10, 2).unwrap_or(0);
    let second = digits_at(base, 12, 2).unwrap_or(0);
    let nanos = match fraction {
        Some(fraction) => fraction_nanos(value, base, fraction)?,
        None => 0,
    };

    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
        .ok_or_else(|| invalid(value, "time of day out of range"))?;

    offset
        .from_local_datetime(&NaiveDateTime::new(date, time))
        .single()
        .map(Some)
        .ok_or_else(|| invalid(value, "ambiguous local time"))
}

/// Like [`parse_date`], but any malformed value becomes `None`.
pub fn parse_date_lenient(value: &str) -> Option<NaiveDate> {
    parse_date(value).ok().flatten()
}

/// Like [`parse_date_time`], but any malformed value becomes `None`.
pub fn parse_date_time_lenient(value: &str) -> Option<DateTime<FixedOffset>> {
    parse_date_time(value).ok().flatten()
}

/// Reads `YYYY[MM[DD]]` from the start of an all-digit `digits`.
fn calendar_date(value: &str, digits: &str) -> Hl7Result<NaiveDate> {
    let year = digits_at(digits, 0, 4).ok_or_else(|| invalid(value, "missing year"))?;
    let month = digits_at(digits, 4, 2).unwrap_or(1);
    let day = digits_at(digits, 6, 2).unwrap_or(1);

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid(value, "not a calendar date"))
}

fn fraction_nanos(value: &str, base: &str, fraction: &str) -> Hl7Result<u32> {
    if base.len() != 14 {
        return Err(invalid(value, "fractional seconds require full seconds"));
    }
    if fraction.is_empty() || fraction.len() > 4 || !all_digits(fraction) {
        return Err(invalid(value, "expected 1 to 4 fractional digits"));
    }

    let scale = 10u32.pow(9 - fraction.len() as u32);
    digits_at::<u32>(fraction, 0, fraction.len())
        .map(|digits| digits * scale)
        .ok_or_else(|| invalid(value, "expected 1 to 4 fractional digits"))
}

fn parse_offset(value: &str, offset: &str) -> Hl7Result<FixedOffset> {
    let (sign, digits) = offset.split_at(1);
    if digits.len() != 4 || !all_digits(digits) {
        return Err(invalid(value, "offset must be +ZZZZ or -ZZZZ"));
    }

    let hours: i32 = digits_at(digits, 0, 2).unwrap_or(0);
    let minutes: i32 = digits_at(digits, 2, 2).unwrap_or(0);
    if minutes >= 60 {
        return Err(invalid(value, "offset minutes out of range"));
    }

    let seconds = hours * 3600 + minutes * 60;
    let seconds = if sign == "-" { -seconds } else { seconds };
    FixedOffset::east_opt(seconds).ok_or_else(|| invalid(value, "offset out of range"))
}

fn digits_at<T: FromStr>(text: &str, start: usize, len: usize) -> Option<T> {
    text.get(start..start + len)?.parse().ok()
}

fn all_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn invalid(value: &str, reason: &'static str) -> Hl7Error {
    Hl7Error::InvalidDateTime {
        value: value.to_string(),
        reason,
    }
}
