//! Postgres implementation of the repository traits.
//!
//! Writes that must not overlap run in a transaction that first takes a
//! transaction-scoped advisory lock for the vehicle and day, then re-checks
//! overlap, then writes. A unique index on the exact slot backs this up.

use std::collections::HashMap;

use async_trait::async_trait;
use eyre::eyre;
use lavagem_core::errors::{ScheduleError, ScheduleResult};
use lavagem_core::models::appointment::{
    Appointment, AppointmentFilter, NewAppointment, OverlapGuard,
};
use lavagem_core::models::employee::{Employee, EmployeeRequest};
use lavagem_core::models::vehicle::{CreateVehicleRequest, Vehicle};
use lavagem_core::repository::{AppointmentRepository, EmployeeRepository, VehicleRepository};
use lavagem_core::time::DateValue;
use uuid::Uuid;

use crate::DbPool;
use crate::models::DbAppointment;
use crate::repositories::{appointment, employee, vehicle};

#[derive(Clone)]
pub struct PgRepository {
    pool: DbPool,
}

impl PgRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Attaches employee ids to each row with a single extra query.
    async fn with_employees(&self, rows: Vec<DbAppointment>) -> ScheduleResult<Vec<Appointment>> {
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut employees: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for link in appointment::get_employee_ids(&self.pool, &ids).await? {
            employees
                .entry(link.appointment_id)
                .or_default()
                .push(link.employee_id);
        }

        rows.into_iter()
            .map(|row| {
                let linked = employees.remove(&row.id).unwrap_or_default();
                row.into_appointment(linked)
            })
            .collect()
    }

    async fn write(
        &self,
        id: Option<Uuid>,
        new: &NewAppointment,
        guard: OverlapGuard,
    ) -> eyre::Result<Option<DbAppointment>> {
        let date = new.date.as_naive();
        let mut tx = self.pool.begin().await?;

        if guard == OverlapGuard::Enforce {
            appointment::lock_vehicle_day(&mut tx, new.vehicle_id, date).await?;
            let taken = appointment::has_overlapping_appointment(
                &mut tx,
                new.vehicle_id,
                date,
                new.slot.start().as_naive(),
                new.slot.end().as_naive(),
                id,
            )
            .await?;
            if taken {
                return Err(eyre!(SlotTaken));
            }
        }

        let row = match id {
            Some(id) => appointment::update_appointment(&mut tx, id, new).await?,
            None => Some(appointment::insert_appointment(&mut tx, new).await?),
        };
        if let Some(row) = &row {
            appointment::replace_employees(&mut tx, row.id, &new.employees).await?;
        }

        tx.commit().await?;
        Ok(row)
    }
}

/// Raised inside a write transaction when the re-check finds an overlap.
#[derive(Debug)]
struct SlotTaken;

impl std::fmt::Display for SlotTaken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("slot already taken")
    }
}

impl std::error::Error for SlotTaken {}

/// Maps write failures: a lost race becomes `UniquenessViolation`.
fn write_error(err: eyre::Report) -> ScheduleError {
    if err.downcast_ref::<SlotTaken>().is_some() {
        return ScheduleError::UniquenessViolation;
    }
    match err.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            ScheduleError::UniquenessViolation
        }
        _ => ScheduleError::Database(err),
    }
}

#[async_trait]
impl AppointmentRepository for PgRepository {
    async fn find_by_vehicle_and_date(
        &self,
        plate: &str,
        date: DateValue,
    ) -> ScheduleResult<Vec<Appointment>> {
        let rows =
            appointment::get_appointments_by_vehicle_and_date(&self.pool, plate, date.as_naive())
                .await?;
        self.with_employees(rows).await
    }

    async fn get(&self, id: Uuid) -> ScheduleResult<Option<Appointment>> {
        match appointment::get_appointment_by_id(&self.pool, id).await? {
            Some(row) => Ok(self.with_employees(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: &AppointmentFilter) -> ScheduleResult<Vec<Appointment>> {
        let rows = appointment::list_appointments(&self.pool, filter).await?;
        self.with_employees(rows).await
    }

    async fn create(&self, new: &NewAppointment) -> ScheduleResult<Appointment> {
        let row = self
            .write(None, new, OverlapGuard::Enforce)
            .await
            .map_err(write_error)?
            .ok_or_else(|| ScheduleError::Database(eyre!("insert returned no row")))?;
        row.into_appointment(new.employees.clone())
    }

    async fn update(
        &self,
        id: Uuid,
        new: &NewAppointment,
        guard: OverlapGuard,
    ) -> ScheduleResult<Appointment> {
        let row = self
            .write(Some(id), new, guard)
            .await
            .map_err(write_error)?
            .ok_or_else(|| ScheduleError::NotFound(format!("Appointment with ID {id} not found")))?;
        row.into_appointment(new.employees.clone())
    }

    async fn delete(&self, id: Uuid) -> ScheduleResult<()> {
        if appointment::delete_appointment(&self.pool, id).await? {
            Ok(())
        } else {
            Err(ScheduleError::NotFound(format!(
                "Appointment with ID {id} not found"
            )))
        }
    }
}

#[async_trait]
impl VehicleRepository for PgRepository {
    async fn find_or_create_by_plate(&self, plate: &str) -> ScheduleResult<Vehicle> {
        let row = vehicle::find_or_create_vehicle_by_plate(&self.pool, plate).await?;
        Ok(row.into())
    }

    async fn create_vehicle(&self, request: &CreateVehicleRequest) -> ScheduleResult<Vehicle> {
        match vehicle::create_vehicle(&self.pool, request).await {
            Ok(row) => Ok(row.into()),
            Err(err) => match write_error(err) {
                ScheduleError::UniquenessViolation => Err(ScheduleError::Validation(format!(
                    "A vehicle with plate {} already exists",
                    request.plate.trim()
                ))),
                other => Err(other),
            },
        }
    }

    async fn get_vehicle(&self, id: Uuid) -> ScheduleResult<Option<Vehicle>> {
        Ok(vehicle::get_vehicle_by_id(&self.pool, id).await?.map(Vehicle::from))
    }

    async fn list_vehicles(&self) -> ScheduleResult<Vec<Vehicle>> {
        let rows = vehicle::list_vehicles(&self.pool).await?;
        Ok(rows.into_iter().map(Vehicle::from).collect())
    }
}

#[async_trait]
impl EmployeeRepository for PgRepository {
    async fn create_employee(&self, request: &EmployeeRequest) -> ScheduleResult<Employee> {
        Ok(employee::create_employee(&self.pool, request.name.trim()).await?.into())
    }

    async fn get_employee(&self, id: Uuid) -> ScheduleResult<Option<Employee>> {
        Ok(employee::get_employee_by_id(&self.pool, id).await?.map(Employee::from))
    }

    async fn list_employees(&self) -> ScheduleResult<Vec<Employee>> {
        let rows = employee::list_employees(&self.pool).await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn update_employee(
        &self,
        id: Uuid,
        request: &EmployeeRequest,
    ) -> ScheduleResult<Employee> {
        employee::update_employee(&self.pool, id, request.name.trim())
            .await?
            .map(Employee::from)
            .ok_or_else(|| ScheduleError::NotFound(format!("Employee with ID {id} not found")))
    }

    async fn delete_employee(&self, id: Uuid) -> ScheduleResult<()> {
        if employee::delete_employee(&self.pool, id).await? {
            Ok(())
        } else {
            Err(ScheduleError::NotFound(format!("Employee with ID {id} not found")))
        }
    }
}
