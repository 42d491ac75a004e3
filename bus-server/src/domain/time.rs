//! Timetable times.
//!
//! The upstream API writes times as "HHhMM" (e.g. "06h40") while callers
//! send "HH:MM". Both forms parse into [`StopTime`], which always
//! displays in the upstream form.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// A time of day on a bus timetable, minute precision.
///
/// # Examples
///
/// ```
/// use bus_server::domain::StopTime;
///
/// let t = StopTime::parse("06h40").unwrap();
/// assert_eq!(t, StopTime::parse("06:40").unwrap());
/// assert_eq!(t.to_string(), "06h40");
/// assert_eq!(t.to_colon_string(), "06:40");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopTime(NaiveTime);

impl StopTime {
    /// Midnight, used as the placeholder route time on synthesized trips.
    pub fn midnight() -> Self {
        Self(NaiveTime::default())
    }

    /// Build from hour and minute.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse "HHhMM" or "HH:MM".
    ///
    /// ```
    /// use bus_server::domain::StopTime;
    ///
    /// assert!(StopTime::parse("00h00").is_ok());
    /// assert!(StopTime::parse("23:59").is_ok());
    ///
    /// assert!(StopTime::parse("6h40").is_err());
    /// assert!(StopTime::parse("24h00").is_err());
    /// assert!(StopTime::parse("12-30").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();

        if bytes.len() != 5 {
            return Err(TimeError::new(s, "expected HHhMM or HH:MM"));
        }

        if bytes[2] != b'h' && bytes[2] != b':' {
            return Err(TimeError::new(s, "expected 'h' or ':' at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new(s, "invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new(s, "hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new(s, "invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new(s, "minute must be 0-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new(s, "invalid time"))
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes since midnight (0..1440).
    pub fn minutes_of_day(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Minutes from `self` forward to `later`, wrapping past midnight.
    ///
    /// ```
    /// use bus_server::domain::StopTime;
    ///
    /// let a = StopTime::parse("23h50").unwrap();
    /// let b = StopTime::parse("00h10").unwrap();
    /// assert_eq!(a.minutes_until(b), 20);
    /// ```
    pub fn minutes_until(&self, later: StopTime) -> u32 {
        let from = self.minutes_of_day();
        let to = later.minutes_of_day();
        if to >= from {
            to - from
        } else {
            to + 24 * 60 - from
        }
    }

    /// "HH:MM", the caller-facing form.
    pub fn to_colon_string(&self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }
}

impl fmt::Display for StopTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}h{:02}", self.hour(), self.minute())
    }
}

impl fmt::Debug for StopTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopTime({self})")
    }
}

fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        }
        _ => None,
    }
}
