//! Calendar date validation.

use chrono::NaiveDate;

/// Input layout for dates: day, month, four-digit year separated by dots.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// True iff `text` is a real calendar date written as `DD.MM.YYYY`.
///
/// No range restriction is applied; a date in the future is still a date.
pub fn validate_date(text: &str) -> bool {
    parse_date(text).is_some()
}

/// Parses a `DD.MM.YYYY` date, returning `None` for any other layout or for
/// impossible dates such as 31 February.
///
/// Day and month take one or two digits, the year exactly four. Signs and
/// whitespace are never accepted.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if !has_date_shape(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

fn has_date_shape(text: &str) -> bool {
    let mut parts = text.split('.');
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let digits = |part: &str, len: std::ops::RangeInclusive<usize>| {
        len.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };
    digits(day, 1..=2) && digits(month, 1..=2) && digits(year, 4..=4)
}
