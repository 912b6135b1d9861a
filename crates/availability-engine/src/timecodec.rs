//! Time-of-day parsing and formatting.
//!
//! Times are minute-of-day integers ([`TimePoint`]) with no date and no
//! timezone. Two input shapes are accepted:
//!
//! - 24-hour: `"HH:MM"` or a bare hour (`"13"`), hour 0–23
//! - 12-hour: `"H[:MM] am|pm"`, case-insensitive, optional whitespace around
//!   the suffix, hour 1–12
//!
//! A suffix is what selects 12-hour interpretation, so `"13"` is valid but
//! `"13pm"` is not.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::day::Day;
use crate::error::{AvailabilityError, Result};

/// Minutes in a day; the exclusive upper bound of a [`TimePoint`].
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Minutes since local midnight, always in `[0, 1440)`.
///
/// Serialized as the 24-hour `HH:MM` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimePoint(u16);

impl TimePoint {
    /// Midnight (`00:00`).
    pub const MIDNIGHT: TimePoint = TimePoint(0);

    /// Build a time point from a raw minute-of-day value.
    ///
    /// # Errors
    /// Returns `AvailabilityError::Range` if `minutes >= 1440`.
    pub fn new(minutes: u16) -> Result<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(AvailabilityError::range(format!(
                "minute of day must be below {MINUTES_PER_DAY}, got {minutes}"
            )));
        }
        Ok(TimePoint(minutes))
    }

    /// Build a time point from a 24-hour clock reading.
    ///
    /// # Errors
    /// Returns `AvailabilityError::Format` if the hour is not 0–23 or the
    /// minute is not 0–59.
    pub fn from_hm(hour: u16, minute: u16) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(AvailabilityError::format("Hour 0-23, minute 0-59"));
        }
        Ok(TimePoint(hour * 60 + minute))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for TimePoint {
    type Error = AvailabilityError;

    fn try_from(value: String) -> Result<Self> {
        parse(&value)
    }
}

impl From<TimePoint> for String {
    fn from(value: TimePoint) -> Self {
        format24(value)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Meridiem {
    Am,
    Pm,
}

// ── Parsing ─────────────────────────────────────────────────────────────────

/// Parse a human time string into a [`TimePoint`].
///
/// `"12am"` is midnight (0) and `"12pm"` is noon (720).
///
/// # Errors
/// Returns `AvailabilityError::Format` for empty input, a wrong number of
/// `:` separators, non-digit components, minutes that are not two digits,
/// or an hour/minute outside its range (0–23 without a suffix, 1–12 with one).
pub fn parse(text: &str) -> Result<TimePoint> {
    let lowered = text.trim().to_ascii_lowercase();
    if lowered.is_empty() {
        return Err(AvailabilityError::format("Time must not be empty"));
    }

    let (body, meridiem) = if let Some(rest) = lowered.strip_suffix("am") {
        (rest.trim_end(), Some(Meridiem::Am))
    } else if let Some(rest) = lowered.strip_suffix("pm") {
        (rest.trim_end(), Some(Meridiem::Pm))
    } else {
        (lowered.as_str(), None)
    };

    let (hour, minute) = split_clock(body)?;

    let hour = match meridiem {
        None => hour,
        Some(m) => {
            if !(1..=12).contains(&hour) {
                return Err(AvailabilityError::format(
                    "Hour must be 1-12 when am/pm is given",
                ));
            }
            // 12am is midnight, 12pm is noon.
            let base = hour % 12;
            if m == Meridiem::Pm {
                base + 12
            } else {
                base
            }
        }
    };

    TimePoint::from_hm(hour, minute)
}

/// Split `"H"`, `"HH"`, `"H:MM"` or `"HH:MM"` into hour and minute.
fn split_clock(body: &str) -> Result<(u16, u16)> {
    let mut parts = body.split(':');
    let hour_text = parts.next().unwrap_or_default();
    let minute_text = parts.next();
    if parts.next().is_some() {
        return Err(AvailabilityError::format("Time must be HH:MM"));
    }

    if hour_text.is_empty() || hour_text.len() > 2 {
        return Err(AvailabilityError::format("Time must be HH:MM"));
    }
    let hour = numeric(hour_text)?;

    let minute = match minute_text {
        None => 0,
        Some(m) if m.len() == 2 => numeric(m)?,
        Some(_) => return Err(AvailabilityError::format("Minutes must be two digits")),
    };
    Ok((hour, minute))
}

fn numeric(text: &str) -> Result<u16> {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AvailabilityError::format("Time must be numeric HH:MM"));
    }
    text.parse()
        .map_err(|_| AvailabilityError::format("Time must be numeric HH:MM"))
}

// ── Formatting ──────────────────────────────────────────────────────────────

/// Zero-padded 24-hour form, e.g. `"09:05"`.
pub fn format24(t: TimePoint) -> String {
    t.to_string()
}

/// 12-hour display form without a leading zero, e.g. `"9:05 AM"`,
/// `"12:00 PM"` (noon), `"12:00 AM"` (midnight).
pub fn format12(t: TimePoint) -> String {
    let (hour, suffix) = match t.hour() {
        0 => (12, "AM"),
        h @ 1..=11 => (h, "AM"),
        12 => (12, "PM"),
        h => (h - 12, "PM"),
    };
    format!("{}:{:02} {}", hour, t.minute(), suffix)
}

// ── Days ────────────────────────────────────────────────────────────────────

/// Normalize a day name to a [`Day`].
///
/// Case-insensitive; only the first three letters count, so `"monday"`,
/// `"Mon"` and `"MONxyz"` are all Monday.
///
/// # Errors
/// Returns `AvailabilityError::Format` if the first three letters are not a
/// day abbreviation.
pub fn normalize_day(text: &str) -> Result<Day> {
    let key: String = text
        .trim()
        .chars()
        .take(3)
        .collect::<String>()
        .to_ascii_uppercase();

    Day::ALL
        .into_iter()
        .find(|d| d.code() == key)
        .ok_or_else(|| AvailabilityError::format("Day must be one of Mon Tue Wed Thu Fri Sat Sun"))
}
