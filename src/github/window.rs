//! Parsing of `--since` time window expressions.
//!
//! Two forms are accepted: a relative span such as `36h`, `7d` or `2w`, and
//! an absolute date or timestamp. Relative spans count back from now; day and
//! week spans move by calendar days in the local time zone, so `1d` at noon
//! is noon yesterday even across a DST change.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};

use super::error::RetrievalError;

const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Resolves a time window expression against the current local time.
///
/// # Errors
///
/// Returns [`RetrievalError::InvalidWindow`] when the input is neither a
/// relative span nor a recognised date.
///
/// # Example
///
/// ```
/// use runsweep::github::window::parse_since;
///
/// let since = parse_since("2026-02-01").expect("date should parse");
/// assert_eq!(since.to_rfc3339(), "2026-02-01T00:00:00+00:00");
/// assert!(parse_since("abc").is_err());
/// ```
pub fn parse_since(raw: &str) -> Result<DateTime<Utc>, RetrievalError> {
    parse_since_at(raw, &Local::now())
}

/// Resolves a time window expression against an explicit "now".
///
/// # Errors
///
/// Returns [`RetrievalError::InvalidWindow`] when the input is neither a
/// relative span nor a recognised date, or when the span reaches before the
/// representable calendar.
pub fn parse_since_at<Tz: TimeZone>(
    raw: &str,
    now: &DateTime<Tz>,
) -> Result<DateTime<Utc>, RetrievalError> {
    let input = raw.trim();
    let invalid = || RetrievalError::InvalidWindow {
        input: raw.to_owned(),
    };

    if let Some((amount, unit)) = split_relative(input) {
        return subtract_span(now, amount, unit).ok_or_else(invalid);
    }

    parse_absolute(input).ok_or_else(invalid)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanUnit {
    Hours,
    Days,
    Weeks,
}

/// Splits `<digits><unit>`; any other shape yields `None` so the input is
/// tried as an absolute date instead.
fn split_relative(input: &str) -> Option<(u32, SpanUnit)> {
    let unit = match input.chars().last()? {
        'h' => SpanUnit::Hours,
        'd' => SpanUnit::Days,
        'w' => SpanUnit::Weeks,
        _ => return None,
    };
    let digits = input.get(..input.len() - 1)?;
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    let amount = digits.parse::<u32>().ok()?;
    Some((amount, unit))
}

fn subtract_span<Tz: TimeZone>(
    now: &DateTime<Tz>,
    amount: u32,
    unit: SpanUnit,
) -> Option<DateTime<Utc>> {
    if amount == 0 {
        return None;
    }
    let shifted = match unit {
        SpanUnit::Hours => now
            .clone()
            .checked_sub_signed(TimeDelta::try_hours(i64::from(amount))?)?,
        SpanUnit::Days => now.clone().checked_sub_days(Days::new(u64::from(amount)))?,
        SpanUnit::Weeks => now
            .clone()
            .checked_sub_days(Days::new(u64::from(amount).checked_mul(7)?))?,
    };
    Some(shifted.with_timezone(&Utc))
}

fn parse_absolute(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.with_timezone(&Utc));
    }

    let naive = NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok());
    if let Some(timestamp) = naive {
        return Some(timestamp.and_utc());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}
