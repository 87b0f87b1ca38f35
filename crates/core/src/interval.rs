use std::fmt;

use serde::Serialize;

use crate::errors::{ScheduleError, ScheduleResult};
use crate::time::TimeOfDay;

/// A half-open time range within a single day. `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl Interval {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> ScheduleResult<Self> {
        if start >= end {
            return Err(ScheduleError::InvalidOrdering {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Callers guarantee `start < end`.
    pub(crate) fn new_unchecked(start: TimeOfDay, end: TimeOfDay) -> Self {
        debug_assert!(start < end);
        Self { start, end }
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Two intervals overlap unless one ends at or before the other begins.
    /// Back-to-back intervals do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }

    /// True when `other` lies entirely inside `self`, boundaries included.
    pub fn contains(&self, other: &Interval) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// `HH:MM - HH:MM`
    pub fn display_range(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// True when `candidate` overlaps at least one of `existing`.
pub fn has_conflict<'a, I>(candidate: &Interval, existing: I) -> bool
where
    I: IntoIterator<Item = &'a Interval>,
{
    existing.into_iter().any(|booked| candidate.overlaps(booked))
}
