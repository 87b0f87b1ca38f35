//! # Appointment scheduler
//!
//! The scheduler runs every create and update request through the validation
//! gates, checks the requested slot against the vehicle's other bookings on
//! the same day, and only then hands the appointment to the repository.
//!
//! ## Conflict handling
//!
//! The conflict gate is advisory: it reads the day's bookings, and a
//! concurrent request may commit between that read and our write. The
//! repository therefore repeats the overlap check atomically at write time
//! and reports `UniquenessViolation` when it loses. Both paths reach the
//! caller as `SlotConflict` carrying the free slots left in the day.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{ScheduleError, ScheduleResult};
use crate::hours::BusinessHours;
use crate::interval::{Interval, has_conflict};
use crate::models::appointment::{
    Appointment, AppointmentFilter, AppointmentRequest, NewAppointment, OverlapGuard, WashType,
};
use crate::models::vehicle::validate_plate;
use crate::repository::{AppointmentRepository, EmployeeRepository, Repository, VehicleRepository};
use crate::slots::free_slots;
use crate::time::DateValue;
use crate::validation::{ValidatedSlot, validate_request};

/// Whether updates repeat the overlap check that creation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdatePolicy {
    /// Updates are checked against the vehicle's other bookings, excluding
    /// the appointment being updated.
    #[default]
    RecheckOverlap,
    /// Updates only pass the format, ordering and business-hours gates.
    /// An update onto the exact slot of another booking of the same vehicle
    /// and day is still rejected as a conflict by the unique slot index.
    SkipOverlap,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulerConfig {
    pub business_hours: BusinessHours,
    pub update_policy: UpdatePolicy,
}

#[derive(Clone)]
pub struct Scheduler {
    repository: Arc<dyn Repository>,
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(repository: Arc<dyn Repository>, config: SchedulerConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub async fn validate_and_create(
        &self,
        request: AppointmentRequest,
    ) -> ScheduleResult<Appointment> {
        let validated = validate_request(&request, &self.config.business_hours)?;

        let booked = self.booked_intervals(&validated.vehicle, validated.date, None).await?;
        if has_conflict(&validated.slot, &booked) {
            info!(
                vehicle = %validated.vehicle,
                date = %validated.date,
                slot = %validated.slot,
                "rejected appointment: slot conflict"
            );
            return Err(self.conflict(&booked));
        }

        let appointment = self.prepare(validated, request).await?;
        match self.repository.create(&appointment).await {
            Ok(created) => {
                info!(id = %created.id, vehicle = %created.vehicle, date = %created.date, "appointment created");
                Ok(created)
            }
            Err(ScheduleError::UniquenessViolation) => {
                warn!(
                    vehicle = %appointment.vehicle,
                    date = %appointment.date,
                    "slot taken by a concurrent request"
                );
                let booked = self
                    .booked_intervals(&appointment.vehicle, appointment.date, None)
                    .await?;
                Err(self.conflict(&booked))
            }
            Err(err) => Err(err),
        }
    }

    pub async fn validate_and_update(
        &self,
        id: Uuid,
        request: AppointmentRequest,
    ) -> ScheduleResult<Appointment> {
        let validated = validate_request(&request, &self.config.business_hours)?;

        if self.repository.get(id).await?.is_none() {
            return Err(not_found(id));
        }

        let guard = match self.config.update_policy {
            UpdatePolicy::RecheckOverlap => {
                let booked = self
                    .booked_intervals(&validated.vehicle, validated.date, Some(id))
                    .await?;
                if has_conflict(&validated.slot, &booked) {
                    info!(%id, slot = %validated.slot, "rejected update: slot conflict");
                    return Err(self.conflict(&booked));
                }
                OverlapGuard::Enforce
            }
            UpdatePolicy::SkipOverlap => OverlapGuard::Skip,
        };

        let appointment = self.prepare(validated, request).await?;
        match self.repository.update(id, &appointment, guard).await {
            Ok(updated) => {
                info!(%id, "appointment updated");
                Ok(updated)
            }
            Err(ScheduleError::UniquenessViolation) => {
                warn!(%id, "update lost a race for the slot");
                let booked = self
                    .booked_intervals(&appointment.vehicle, appointment.date, Some(id))
                    .await?;
                Err(self.conflict(&booked))
            }
            Err(err) => Err(err),
        }
    }

    pub async fn delete(&self, id: Uuid) -> ScheduleResult<()> {
        self.repository.delete(id).await?;
        info!(%id, "appointment deleted");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> ScheduleResult<Appointment> {
        self.repository.get(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn list(&self, filter: &AppointmentFilter) -> ScheduleResult<Vec<Appointment>> {
        self.repository.list(filter).await
    }

    /// Free intervals left in the business day for a vehicle.
    pub async fn free_slots_for(&self, plate: &str, date: DateValue) -> ScheduleResult<Vec<Interval>> {
        let booked = self.booked_intervals(plate.trim(), date, None).await?;
        Ok(free_slots(self.config.business_hours.window(), &booked))
    }

    async fn booked_intervals(
        &self,
        plate: &str,
        date: DateValue,
        exclude: Option<Uuid>,
    ) -> ScheduleResult<Vec<Interval>> {
        let existing = self.repository.find_by_vehicle_and_date(plate, date).await?;
        debug!(vehicle = plate, %date, count = existing.len(), "loaded bookings");
        Ok(existing
            .iter()
            .filter(|appointment| Some(appointment.id) != exclude)
            .map(Appointment::interval)
            .collect())
    }

    fn conflict(&self, booked: &[Interval]) -> ScheduleError {
        ScheduleError::SlotConflict {
            free_slots: free_slots(self.config.business_hours.window(), booked),
        }
    }

    /// Resolves the remaining fields once every gate has passed.
    async fn prepare(
        &self,
        validated: ValidatedSlot,
        request: AppointmentRequest,
    ) -> ScheduleResult<NewAppointment> {
        let wash_type: WashType = request
            .wash_type
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .ok_or_else(|| ScheduleError::MissingField(vec!["wash_type"]))?
            .parse()?;
        let plate = validate_plate(&validated.vehicle)?;

        for employee in &request.employees {
            if self.repository.get_employee(*employee).await?.is_none() {
                return Err(ScheduleError::Validation(format!(
                    "Unknown employee {employee}"
                )));
            }
        }

        let vehicle = self
            .repository
            .find_or_create_by_plate(plate)
            .await?;

        let mut employees = request.employees;
        employees.sort();
        employees.dedup();

        Ok(NewAppointment {
            vehicle_id: vehicle.id,
            vehicle: vehicle.plate,
            wash_type,
            date: validated.date,
            slot: validated.slot,
            note: request.note.filter(|note| !note.trim().is_empty()),
            employees,
        })
    }
}

fn not_found(id: Uuid) -> ScheduleError {
    ScheduleError::NotFound(format!("Appointment with ID {id} not found"))
}
