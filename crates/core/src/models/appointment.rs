use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ScheduleError;
use crate::interval::Interval;
use crate::models::vehicle::same_plate;
use crate::time::{DateValue, TimeOfDay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WashType {
    #[serde(alias = "simples")]
    Basic,
    #[serde(alias = "completa")]
    Full,
    #[serde(alias = "especial")]
    Special,
}

impl WashType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WashType::Basic => "basic",
            WashType::Full => "full",
            WashType::Special => "special",
        }
    }
}

impl fmt::Display for WashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WashType {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" | "simples" => Ok(WashType::Basic),
            "full" | "completa" => Ok(WashType::Full),
            "special" | "especial" => Ok(WashType::Special),
            other => Err(ScheduleError::Validation(format!(
                "Unknown wash type '{other}'. Use basic, full or special."
            ))),
        }
    }
}

/// A stored wash appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub vehicle: String,
    pub wash_type: WashType,
    pub date: DateValue,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub note: Option<String>,
    pub employees: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// The booked range. Stored appointments always satisfy `start < end`.
    pub fn interval(&self) -> Interval {
        Interval::new_unchecked(self.start_time, self.end_time)
    }

    /// Case-insensitive plate comparison, see [`same_plate`].
    pub fn is_for_vehicle(&self, plate: &str) -> bool {
        same_plate(&self.vehicle, plate)
    }
}

/// Raw create/update payload, before any validation gate has run.
///
/// Every scheduling field is optional so that absence is reported by the
/// presence gate rather than by the deserializer. The Portuguese field names
/// of the legacy API are accepted as aliases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentRequest {
    #[serde(default, alias = "veiculo")]
    pub vehicle: Option<String>,
    /// Parsed after the scheduling gates, so a bad value never hides a
    /// date or time error.
    #[serde(default, alias = "tipo_lavagem")]
    pub wash_type: Option<String>,
    #[serde(default, alias = "data")]
    pub date: Option<String>,
    #[serde(default, alias = "hora_inicio")]
    pub start_time: Option<String>,
    #[serde(default, alias = "hora_fim")]
    pub end_time: Option<String>,
    #[serde(default, alias = "observacao")]
    pub note: Option<String>,
    #[serde(default, alias = "funcionarios")]
    pub employees: Vec<Uuid>,
}

/// A validated appointment ready to be written by a repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub vehicle_id: Uuid,
    pub vehicle: String,
    pub wash_type: WashType,
    pub date: DateValue,
    pub slot: Interval,
    pub note: Option<String>,
    pub employees: Vec<Uuid>,
}

/// Whether a repository write re-checks overlap against other bookings of
/// the same vehicle and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapGuard {
    Enforce,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    StartTime,
    EndTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub descending: bool,
}

impl FromStr for SortKey {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (descending, name) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let field = match name {
            "date" | "data" => SortField::Date,
            "start_time" | "hora_inicio" => SortField::StartTime,
            "end_time" | "hora_fim" => SortField::EndTime,
            other => {
                return Err(ScheduleError::Validation(format!(
                    "Cannot order by '{other}'"
                )));
            }
        };
        Ok(SortKey { field, descending })
    }
}

/// Filters and ordering for listing appointments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub vehicle: Option<String>,
    pub wash_type: Option<WashType>,
    pub date: Option<DateValue>,
    pub ordering: Vec<SortKey>,
}

impl AppointmentFilter {
    /// Default ordering: date, then start time.
    pub fn default_ordering() -> Vec<SortKey> {
        vec![
            SortKey {
                field: SortField::Date,
                descending: false,
            },
            SortKey {
                field: SortField::StartTime,
                descending: false,
            },
        ]
    }

    /// Parses a comma-separated ordering such as `-date,start_time`.
    /// An empty string yields the default ordering.
    pub fn parse_ordering(raw: &str) -> Result<Vec<SortKey>, ScheduleError> {
        let keys = raw
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(SortKey::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        if keys.is_empty() {
            Ok(Self::default_ordering())
        } else {
            Ok(keys)
        }
    }

    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.vehicle
            .as_deref()
            .is_none_or(|plate| appointment.is_for_vehicle(plate))
            && self.wash_type.is_none_or(|w| appointment.wash_type == w)
            && self.date.is_none_or(|d| appointment.date == d)
    }

    /// Sorts by the requested keys, falling back to creation order.
    pub fn sort(&self, appointments: &mut [Appointment]) {
        appointments.sort_by(|a, b| {
            self.ordering
                .iter()
                .map(|key| {
                    let ordering = match key.field {
                        SortField::Date => a.date.cmp(&b.date),
                        SortField::StartTime => a.start_time.cmp(&b.start_time),
                        SortField::EndTime => a.end_time.cmp(&b.end_time),
                    };
                    if key.descending { ordering.reverse() } else { ordering }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or_else(|| a.created_at.cmp(&b.created_at))
        });
    }
}

impl Default for AppointmentFilter {
    fn default() -> Self {
        Self {
            vehicle: None,
            wash_type: None,
            date: None,
            ordering: Self::default_ordering(),
        }
    }
}

/// Response body for the free-slot query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreeSlotsResponse {
    pub vehicle: String,
    pub date: DateValue,
    pub free_slots: Vec<String>,
}
