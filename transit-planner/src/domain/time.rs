//! Clock time handling.
//!
//! Timetables record times as "HH:MM" strings. The planner itself works
//! exclusively on integer minutes since midnight, so this module converts
//! between the two representations at the edges.
//!
//! Multi-day rollover is not modelled: "24:00" and later are rejected by the
//! parser, and data containing past-midnight continuations must be
//! normalised before it reaches the timetable.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};

/// Number of minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Error returned when a clock string or minute value cannot be converted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeFormatError {
    reason: &'static str,
}

impl TimeFormatError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    /// Returns a short description of what was wrong with the input.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// A minute-of-day offset, the only time unit the planner understands.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::Minutes;
///
/// let t = Minutes::parse_hhmm("08:25").unwrap();
/// assert_eq!(t.get(), 8 * 60 + 25);
/// assert_eq!(t.to_string(), "08:25");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Minutes(u32);

impl Minutes {
    /// Wraps a raw minute count.
    pub const fn new(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Builds a value from hour and minute components.
    pub const fn from_hm(hour: u32, minute: u32) -> Self {
        Self(hour * 60 + minute)
    }

    /// Returns the raw minute count.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Parse a time from fixed "HH:MM" 24-hour format.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_planner::domain::Minutes;
    ///
    /// // Valid times
    /// assert!(Minutes::parse_hhmm("00:00").is_ok());
    /// assert!(Minutes::parse_hhmm("23:59").is_ok());
    ///
    /// // Invalid formats
    /// assert!(Minutes::parse_hhmm("0800").is_err());
    /// assert!(Minutes::parse_hhmm("8:00").is_err());
    /// assert!(Minutes::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeFormatError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeFormatError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeFormatError::new("expected colon at position 2"));
        }

        let hour = parse_two_digits(&bytes[0..2])
            .ok_or_else(|| TimeFormatError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeFormatError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeFormatError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeFormatError::new("minute must be 0-59"));
        }

        Ok(Self::from_hm(hour, minute))
    }

    /// Returns the hour component. May exceed 23 for values past midnight.
    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    /// Returns the minute component (0-59).
    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    /// Builds a value from a wall-clock time, discarding seconds.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self::from_hm(time.hour(), time.minute())
    }

    /// Returns how many minutes `self` is after `earlier`, or `None` if it
    /// is before.
    pub fn minutes_since(self, earlier: Minutes) -> Option<u32> {
        self.0.checked_sub(earlier.0)
    }
}

impl fmt::Debug for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Minutes({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for Minutes {
    type Err = TimeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hhmm(s)
    }
}

impl Serialize for Minutes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse an "HH:MM" string into minutes since midnight.
pub fn to_minutes(text: &str) -> Result<Minutes, TimeFormatError> {
    Minutes::parse_hhmm(text)
}

/// Format a signed minute count as a zero-padded "HH:MM" string.
///
/// Negative input is rejected rather than wrapped.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::to_clock;
///
/// assert_eq!(to_clock(505).unwrap(), "08:25");
/// assert!(to_clock(-1).is_err());
/// ```
pub fn to_clock(minutes: i64) -> Result<String, TimeFormatError> {
    if minutes < 0 {
        return Err(TimeFormatError::new("minutes must not be negative"));
    }
    let minutes =
        u32::try_from(minutes).map_err(|_| TimeFormatError::new("minutes out of range"))?;
    Ok(Minutes(minutes).to_string())
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_time()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}:{:02}", hour, minute)
        }
    }

    proptest! {
        /// Any valid HH:MM string parses successfully
        #[test]
        fn valid_hhmm_parses(time_str in valid_time()) {
            prop_assert!(to_minutes(&time_str).is_ok());
        }

        /// Parse then format roundtrips
        #[test]
        fn parse_clock_roundtrip(time_str in valid_time()) {
            let parsed = to_minutes(&time_str).unwrap();
            prop_assert_eq!(to_clock(i64::from(parsed.get())).unwrap(), time_str);
        }

        /// Minute values within a day survive formatting and parsing
        #[test]
        fn clock_parse_roundtrip(minutes in 0u32..MINUTES_PER_DAY) {
            let text = to_clock(i64::from(minutes)).unwrap();
            prop_assert_eq!(to_minutes(&text).unwrap().get(), minutes);
        }

        /// Ordering of parsed values agrees with ordering of the text
        #[test]
        fn ordering_matches_text(a in valid_time(), b in valid_time()) {
            let ma = to_minutes(&a).unwrap();
            let mb = to_minutes(&b).unwrap();
            prop_assert_eq!(ma.cmp(&mb), a.cmp(&b));
        }

        /// Invalid hour is rejected
        #[test]
        fn invalid_hour_rejected(hour in 24u32..100, minute in 0u32..60) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(to_minutes(&s).is_err());
        }

        /// Invalid minute is rejected
        #[test]
        fn invalid_minute_rejected(hour in 0u32..24, minute in 60u32..100) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(to_minutes(&s).is_err());
        }

        /// Negative input never formats
        #[test]
        fn negative_rejected(minutes in i64::MIN..0) {
            prop_assert!(to_clock(minutes).is_err());
        }
    }
}
