use chrono::{NaiveTime, TimeDelta};
use serde::Serialize;

use crate::errors::{ScheduleError, ScheduleResult};
use crate::interval::Interval;
use crate::time::TimeOfDay;

/// The daily window every appointment has to fit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusinessHours {
    window: Interval,
}

impl BusinessHours {
    pub fn new(open: TimeOfDay, close: TimeOfDay) -> ScheduleResult<Self> {
        let window = Interval::new(open, close).map_err(|_| {
            ScheduleError::Validation(format!(
                "Business hours must open before they close (got {open} - {close})"
            ))
        })?;
        Ok(Self { window })
    }

    pub fn window(&self) -> Interval {
        self.window
    }

    /// Boundaries are inclusive: an appointment may start exactly at opening
    /// and end exactly at closing.
    pub fn fits(&self, interval: &Interval) -> bool {
        self.window.contains(interval)
    }

    /// Fails with `OutOfHours` when the interval leaves the window.
    pub fn check(&self, interval: &Interval) -> ScheduleResult<()> {
        if self.fits(interval) {
            Ok(())
        } else {
            Err(ScheduleError::OutOfHours {
                window: self.window,
            })
        }
    }
}

impl Default for BusinessHours {
    /// 08:00 - 18:00
    fn default() -> Self {
        let open = TimeOfDay::from(NaiveTime::MIN + TimeDelta::hours(8));
        let close = TimeOfDay::from(NaiveTime::MIN + TimeDelta::hours(18));
        Self {
            window: Interval::new_unchecked(open, close),
        }
    }
}
