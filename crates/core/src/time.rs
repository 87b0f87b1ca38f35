//! Time and date normalization.
//!
//! Times arrive as `HH:MM` or `HH:MM:SS` and are reduced to minute precision.
//! Dates arrive strictly as `DD/MM/YYYY`. Both types render back in the same
//! canonical text form they are stored with.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{ScheduleError, ScheduleResult};

const TIME_FORMAT: &str = "%H:%M";
const TIME_FORMAT_WITH_SECONDS: &str = "%H:%M:%S";
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Wall-clock time with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Builds a time from its parts, returning `None` when out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl From<NaiveTime> for TimeOfDay {
    /// Seconds and sub-second precision are truncated.
    fn from(time: NaiveTime) -> Self {
        Self(time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_time(&raw).map_err(serde::de::Error::custom)
    }
}

/// Calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateValue(NaiveDate);

impl DateValue {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for DateValue {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_date(s)
    }
}

impl Serialize for DateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parses `HH:MM` or `HH:MM:SS`. Seconds are dropped, never rounded.
pub fn parse_time(input: &str) -> ScheduleResult<TimeOfDay> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, TIME_FORMAT_WITH_SECONDS)
        .or_else(|_| NaiveTime::parse_from_str(input, TIME_FORMAT))
        .map(TimeOfDay::from)
        .map_err(|_| ScheduleError::InvalidTimeFormat(input.to_string()))
}

/// Returns the canonical `HH:MM` form of a time string.
pub fn normalize_time(input: &str) -> ScheduleResult<String> {
    parse_time(input).map(|time| time.to_string())
}

/// Parses a `DD/MM/YYYY` date.
pub fn parse_date(input: &str) -> ScheduleResult<DateValue> {
    let input = input.trim();
    let invalid = || ScheduleError::InvalidDateFormat(input.to_string());

    // chrono's %Y takes any number of digits; the year must be exactly four.
    let parts: Vec<&str> = input.split('/').collect();
    let shape_ok = match parts.as_slice() {
        [day, month, year] => {
            is_digits(day, 1..=2) && is_digits(month, 1..=2) && is_digits(year, 4..=4)
        }
        _ => false,
    };
    if !shape_ok {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map(DateValue)
        .map_err(|_| invalid())
}

fn is_digits(part: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
}
