// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly course meeting windows.
//!
//! A course meets on one weekday between a start and an end time. Windows
//! are half-open: a course ending at 10:00 does not clash with one
//! starting at 10:00.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Time, Weekday};

use crate::error::DomainError;

/// Parses a weekday name (`monday` .. `sunday`, case-insensitive).
///
/// # Errors
///
/// Returns an error if the name is not an English weekday.
pub fn parse_weekday(value: &str) -> Result<Weekday, DomainError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "monday" => Ok(Weekday::Monday),
        "tuesday" => Ok(Weekday::Tuesday),
        "wednesday" => Ok(Weekday::Wednesday),
        "thursday" => Ok(Weekday::Thursday),
        "friday" => Ok(Weekday::Friday),
        "saturday" => Ok(Weekday::Saturday),
        "sunday" => Ok(Weekday::Sunday),
        _ => Err(DomainError::InvalidWeekday(value.to_string())),
    }
}

/// Returns the stored (lowercase) name of a weekday.
#[must_use]
pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "monday",
        Weekday::Tuesday => "tuesday",
        Weekday::Wednesday => "wednesday",
        Weekday::Thursday => "thursday",
        Weekday::Friday => "friday",
        Weekday::Saturday => "saturday",
        Weekday::Sunday => "sunday",
    }
}

/// Zero-padded 24-hour `HH:MM`.
const CLOCK_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

/// Parses an `HH:MM` clock time.
///
/// # Errors
///
/// Returns an error if the value is not a valid 24-hour `HH:MM` time.
pub fn parse_clock_time(value: &str) -> Result<Time, DomainError> {
    Time::parse(value.trim(), CLOCK_FORMAT).map_err(|e| {
        DomainError::InvalidTimeWindow(format!("'{value}' is not an HH:MM time: {e}"))
    })
}

/// Formats a clock time as zero-padded `HH:MM`.
///
/// The padded form sorts lexicographically in clock order, which the
/// stored representation relies on.
#[must_use]
pub fn format_clock_time(value: Time) -> String {
    // A `Time` always carries the hour and minute components.
    value.format(CLOCK_FORMAT).unwrap_or_default()
}

/// The weekly meeting window of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyWindow {
    day: Weekday,
    start: Time,
    end: Time,
}

impl WeeklyWindow {
    /// Creates a window, requiring `start < end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the window is empty or inverted.
    pub fn new(day: Weekday, start: Time, end: Time) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidTimeWindow(format!(
                "start {} must be before end {}",
                format_clock_time(start),
                format_clock_time(end)
            )));
        }
        Ok(Self { day, start, end })
    }

    /// Parses a window from its stored parts.
    ///
    /// # Errors
    ///
    /// Returns an error if any part is malformed or the window is inverted.
    pub fn parse(day: &str, start: &str, end: &str) -> Result<Self, DomainError> {
        Self::new(
            parse_weekday(day)?,
            parse_clock_time(start)?,
            parse_clock_time(end)?,
        )
    }

    /// The weekday the course meets on.
    #[must_use]
    pub const fn day(&self) -> Weekday {
        self.day
    }

    /// The start time (inclusive).
    #[must_use]
    pub const fn start(&self) -> Time {
        self.start
    }

    /// The end time (exclusive).
    #[must_use]
    pub const fn end(&self) -> Time {
        self.end
    }

    /// Returns whether two windows share a weekday and overlap in time.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && other.start < self.end && other.end > self.start
    }
}

impl std::fmt::Display for WeeklyWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}-{}",
            weekday_name(self.day),
            format_clock_time(self.start),
            format_clock_time(self.end)
        )
    }
}
