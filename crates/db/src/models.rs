use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use lavagem_core::errors::ScheduleResult;
use lavagem_core::models::appointment::{Appointment, WashType};
use lavagem_core::models::employee::Employee;
use lavagem_core::models::vehicle::Vehicle;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVehicle {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub plate: String,
    pub color: String,
}

impl From<DbVehicle> for Vehicle {
    fn from(row: DbVehicle) -> Self {
        Vehicle {
            id: row.id,
            name: row.name,
            brand: row.brand,
            plate: row.plate,
            color: row.color,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEmployee {
    pub id: Uuid,
    pub name: String,
}

impl From<DbEmployee> for Employee {
    fn from(row: DbEmployee) -> Self {
        Employee {
            id: row.id,
            name: row.name,
        }
    }
}

/// An appointment row joined with its vehicle's plate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub plate: String,
    pub wash_type: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DbAppointment {
    pub fn into_appointment(self, employees: Vec<Uuid>) -> ScheduleResult<Appointment> {
        Ok(Appointment {
            id: self.id,
            vehicle_id: self.vehicle_id,
            vehicle: self.plate,
            wash_type: self.wash_type.parse::<WashType>()?,
            date: self.date.into(),
            start_time: self.start_time.into(),
            end_time: self.end_time.into(),
            note: self.note,
            employees,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointmentEmployee {
    pub appointment_id: Uuid,
    pub employee_id: Uuid,
}
