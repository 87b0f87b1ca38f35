//! Storage seams for the scheduler.
//!
//! Implementations live in the db crate: a Postgres repository and an
//! in-memory one. Both must make `create` (and `update` under
//! [`OverlapGuard::Enforce`]) an atomic check-and-write per vehicle and date,
//! so two concurrent writers can never both commit overlapping bookings.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ScheduleResult;
use crate::models::appointment::{Appointment, AppointmentFilter, NewAppointment, OverlapGuard};
use crate::models::employee::{Employee, EmployeeRequest};
use crate::models::vehicle::{CreateVehicleRequest, Vehicle};
use crate::time::DateValue;

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Appointments of `plate` (case-insensitive) on `date`, ordered by start time.
    async fn find_by_vehicle_and_date(
        &self,
        plate: &str,
        date: DateValue,
    ) -> ScheduleResult<Vec<Appointment>>;

    async fn get(&self, id: Uuid) -> ScheduleResult<Option<Appointment>>;

    async fn list(&self, filter: &AppointmentFilter) -> ScheduleResult<Vec<Appointment>>;

    /// Fails with `UniquenessViolation` when an overlapping booking for the
    /// same vehicle and date was committed first.
    async fn create(&self, appointment: &NewAppointment) -> ScheduleResult<Appointment>;

    /// Replaces every field except `id` and `created_at`. Fails with
    /// `NotFound` for an unknown id.
    async fn update(
        &self,
        id: Uuid,
        appointment: &NewAppointment,
        guard: OverlapGuard,
    ) -> ScheduleResult<Appointment>;

    async fn delete(&self, id: Uuid) -> ScheduleResult<()>;
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Looks the plate up case-insensitively, inserting a placeholder record
    /// (see [`CreateVehicleRequest::placeholder`]) when it is unknown.
    async fn find_or_create_by_plate(&self, plate: &str) -> ScheduleResult<Vehicle>;

    /// Fails with `Validation` when the plate is already registered.
    async fn create_vehicle(&self, vehicle: &CreateVehicleRequest) -> ScheduleResult<Vehicle>;

    async fn get_vehicle(&self, id: Uuid) -> ScheduleResult<Option<Vehicle>>;

    async fn list_vehicles(&self) -> ScheduleResult<Vec<Vehicle>>;
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn create_employee(&self, employee: &EmployeeRequest) -> ScheduleResult<Employee>;

    async fn get_employee(&self, id: Uuid) -> ScheduleResult<Option<Employee>>;

    async fn list_employees(&self) -> ScheduleResult<Vec<Employee>>;

    async fn update_employee(
        &self,
        id: Uuid,
        employee: &EmployeeRequest,
    ) -> ScheduleResult<Employee>;

    async fn delete_employee(&self, id: Uuid) -> ScheduleResult<()>;
}

/// Everything the scheduler and the HTTP layer need from storage.
pub trait Repository: AppointmentRepository + VehicleRepository + EmployeeRepository {}

impl<T> Repository for T where T: AppointmentRepository + VehicleRepository + EmployeeRepository {}
