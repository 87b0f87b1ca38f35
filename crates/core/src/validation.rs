//! The pure validation gates applied to every create and update request.
//!
//! Gates run in a fixed order and stop at the first failure:
//!
//! 1. presence of vehicle, date, start and end
//! 2. date format
//! 3. time format, start and end independently
//! 4. start strictly before end
//! 5. business hours
//!
//! The conflict gate needs the repository and lives in the scheduler.

use crate::errors::{ScheduleError, ScheduleResult};
use crate::hours::BusinessHours;
use crate::interval::Interval;
use crate::models::appointment::AppointmentRequest;
use crate::time::{DateValue, parse_date, parse_time};

/// The scheduling fields of a request after gates 1 to 5.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSlot {
    pub vehicle: String,
    pub date: DateValue,
    pub slot: Interval,
}

pub fn validate_request(
    request: &AppointmentRequest,
    hours: &BusinessHours,
) -> ScheduleResult<ValidatedSlot> {
    let (vehicle, date, start, end) = require_fields(request)?;

    let date = parse_date(date)?;
    let start = parse_time(start)?;
    let end = parse_time(end)?;
    let slot = Interval::new(start, end)?;
    hours.check(&slot)?;

    Ok(ValidatedSlot {
        vehicle: vehicle.trim().to_string(),
        date,
        slot,
    })
}

fn require_fields(request: &AppointmentRequest) -> ScheduleResult<(&str, &str, &str, &str)> {
    fn present(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.trim().is_empty())
    }

    match (
        present(&request.vehicle),
        present(&request.date),
        present(&request.start_time),
        present(&request.end_time),
    ) {
        (Some(vehicle), Some(date), Some(start), Some(end)) => Ok((vehicle, date, start, end)),
        (vehicle, date, start, end) => {
            let missing = [
                ("vehicle", vehicle.is_none()),
                ("date", date.is_none()),
                ("start_time", start.is_none()),
                ("end_time", end.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
            Err(ScheduleError::MissingField(missing))
        }
    }
}
