//! Schedule time handling.
//!
//! Bus schedules provide times as "HH:MM" strings relative to a service day.
//! This module provides a type for working with these times, handling
//! overnight trips that run past midnight (hours up to 47, GTFS-style).

use std::fmt;
use std::ops::Add;

use chrono::Duration;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A scheduled time within a service day.
///
/// Stored as minutes after midnight of the service day. Overnight trips use
/// hours 24-47 so that stop sequences stay monotonically increasing without
/// tracking a separate date.
///
/// # Examples
///
/// ```
/// use transit_server::domain::ScheduleTime;
///
/// let time = ScheduleTime::parse_hhmm("14:30").unwrap();
/// assert_eq!(time.to_string(), "14:30");
///
/// // Past-midnight times are valid and sort after the evening
/// let late = ScheduleTime::parse_hhmm("25:10").unwrap();
/// assert!(late > time);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleTime {
    minutes: i32,
}

impl ScheduleTime {
    /// Create a time from minutes after midnight of the service day.
    pub fn from_minutes(minutes: i32) -> Self {
        Self { minutes }
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// Hours 24-47 are accepted for overnight trips.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_server::domain::ScheduleTime;
    ///
    /// assert!(ScheduleTime::parse_hhmm("00:00").is_ok());
    /// assert!(ScheduleTime::parse_hhmm("23:59").is_ok());
    /// assert!(ScheduleTime::parse_hhmm("26:15").is_ok());
    ///
    /// assert!(ScheduleTime::parse_hhmm("1430").is_err());
    /// assert!(ScheduleTime::parse_hhmm("14:3").is_err());
    /// assert!(ScheduleTime::parse_hhmm("48:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 47 {
            return Err(TimeError::new("hour must be 0-47"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Ok(Self {
            minutes: (hour * 60 + minute) as i32,
        })
    }

    /// Returns minutes after midnight of the service day.
    pub fn minutes(&self) -> i32 {
        self.minutes
    }

    /// Returns the hour (0-47).
    pub fn hour(&self) -> u32 {
        (self.minutes / 60) as u32
    }

    /// Returns the minute within the hour (0-59).
    pub fn minute(&self) -> u32 {
        (self.minutes % 60) as u32
    }

    /// Returns the signed duration from `earlier` to `self`.
    pub fn signed_duration_since(&self, earlier: ScheduleTime) -> Duration {
        Duration::minutes((self.minutes - earlier.minutes) as i64)
    }
}

fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

impl Add<Duration> for ScheduleTime {
    type Output = ScheduleTime;

    fn add(self, rhs: Duration) -> ScheduleTime {
        ScheduleTime {
            minutes: self.minutes + rhs.num_minutes() as i32,
        }
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl fmt::Debug for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScheduleTime({self})")
    }
}
