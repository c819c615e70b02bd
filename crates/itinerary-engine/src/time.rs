//! Wall-clock time codec for schedule items.
//!
//! Schedule times are stored as `"HH:mm"` strings. All arithmetic happens on
//! integer minute-of-day values; formatting back to text wraps modulo 24
//! hours. The wrap carries no day-rollover signal: shifting `23:30` by +60
//! minutes yields `00:30` on the same day.

use chrono::{NaiveTime, Timelike};

use crate::error::{ItineraryError, Result};

pub const MINUTES_PER_HOUR: i64 = 60;
pub const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

// ── time_to_minutes ─────────────────────────────────────────────────────────

/// Convert an `H:M` time string to minutes since midnight.
///
/// Lenient about digit count (`"9:05"` parses), so stored times that were
/// never validated still convert. Use [`is_valid_time`] to enforce the strict
/// `HH:mm` form on user input.
///
/// # Errors
///
/// Returns [`ItineraryError::InvalidTimeFormat`] if the string is not two
/// colon-separated unsigned integers.
///
/// # Examples
///
/// ```
/// use itinerary_engine::time::time_to_minutes;
///
/// assert_eq!(time_to_minutes("10:30").unwrap(), 630);
/// ```
pub fn time_to_minutes(time: &str) -> Result<i64> {
    let invalid = || ItineraryError::InvalidTimeFormat(time.to_string());

    let (hours, minutes) = time.split_once(':').ok_or_else(invalid)?;
    let hours = parse_unsigned(hours).ok_or_else(invalid)?;
    let minutes = parse_unsigned(minutes).ok_or_else(invalid)?;

    Ok(hours * MINUTES_PER_HOUR + minutes)
}

// ── minutes_to_time ─────────────────────────────────────────────────────────

/// Format a minute value as `HH:mm`, wrapping into a single day.
///
/// Hours are taken modulo 24 and minutes modulo 60 (Euclidean), so values past
/// midnight wrap forward and negative values wrap backward.
///
/// # Examples
///
/// ```
/// use itinerary_engine::time::minutes_to_time;
///
/// assert_eq!(minutes_to_time(1500), "01:00");
/// assert_eq!(minutes_to_time(-30), "23:30");
/// ```
pub fn minutes_to_time(minutes: i64) -> String {
    let hours = minutes.div_euclid(MINUTES_PER_HOUR).rem_euclid(24);
    let mins = minutes.rem_euclid(MINUTES_PER_HOUR);
    format!("{hours:02}:{mins:02}")
}

// ── is_valid_time ───────────────────────────────────────────────────────────

/// True iff `time` is exactly `HH:mm` with hours 00–23 and minutes 00–59.
pub fn is_valid_time(time: &str) -> bool {
    parse_clock_time(time).is_ok()
}

/// Strictly parse `HH:mm` into a [`NaiveTime`].
///
/// # Errors
///
/// Returns [`ItineraryError::InvalidTimeFormat`] unless the string has two
/// digits, a colon and two digits, and names a real wall-clock minute.
pub fn parse_clock_time(time: &str) -> Result<NaiveTime> {
    let invalid = || ItineraryError::InvalidTimeFormat(time.to_string());

    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }

    let hours = parse_unsigned(&time[0..2]).ok_or_else(invalid)?;
    let minutes = parse_unsigned(&time[3..5]).ok_or_else(invalid)?;

    NaiveTime::from_hms_opt(hours as u32, minutes as u32, 0).ok_or_else(invalid)
}

/// Minutes since midnight of a chrono time (seconds are dropped).
pub fn clock_time_to_minutes(time: NaiveTime) -> i64 {
    time.hour() as i64 * MINUTES_PER_HOUR + time.minute() as i64
}

// ── shift_time ──────────────────────────────────────────────────────────────

/// Move a time string by `delta` minutes, wrapping across midnight.
///
/// # Errors
///
/// Returns [`ItineraryError::InvalidTimeFormat`] if `time` cannot be parsed.
pub fn shift_time(time: &str, delta: i64) -> Result<String> {
    Ok(minutes_to_time(time_to_minutes(time)? + delta))
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn parse_unsigned(s: &str) -> Option<i64> {
    if s.is_empty() || s.len() > 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

// ── Tests ───────────────────────────────────────────────────────────────────
