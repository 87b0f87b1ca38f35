//! In-process repository used by tests and local runs without Postgres.
//!
//! All state sits behind one async mutex, so every check-and-write is atomic
//! with respect to every other call.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use lavagem_core::errors::{ScheduleError, ScheduleResult};
use lavagem_core::interval::has_conflict;
use lavagem_core::models::appointment::{
    Appointment, AppointmentFilter, NewAppointment, OverlapGuard,
};
use lavagem_core::models::employee::{Employee, EmployeeRequest};
use lavagem_core::models::vehicle::{CreateVehicleRequest, Vehicle, same_plate};
use lavagem_core::repository::{AppointmentRepository, EmployeeRepository, VehicleRepository};
use lavagem_core::time::DateValue;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct Store {
    appointments: HashMap<Uuid, Appointment>,
    vehicles: HashMap<Uuid, Vehicle>,
    employees: HashMap<Uuid, Employee>,
}

impl Store {
    fn vehicle_by_plate(&self, plate: &str) -> Option<&Vehicle> {
        self.vehicles
            .values()
            .find(|vehicle| same_plate(&vehicle.plate, plate))
    }

    /// Mirrors the unique slot index, which holds even when overlap is not enforced.
    fn is_duplicate(&self, new: &NewAppointment, exclude: Uuid) -> bool {
        self.appointments.values().any(|a| {
            a.id != exclude
                && a.vehicle_id == new.vehicle_id
                && a.date == new.date
                && a.interval() == new.slot
        })
    }

    fn is_taken(&self, new: &NewAppointment, exclude: Option<Uuid>) -> bool {
        let booked: Vec<_> = self
            .appointments
            .values()
            .filter(|a| Some(a.id) != exclude && a.vehicle_id == new.vehicle_id && a.date == new.date)
            .map(Appointment::interval)
            .collect();
        has_conflict(&new.slot, &booked)
    }
}

#[derive(Default)]
pub struct InMemoryRepository {
    store: Mutex<Store>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn appointment_not_found(id: Uuid) -> ScheduleError {
    ScheduleError::NotFound(format!("Appointment with ID {id} not found"))
}

fn employee_not_found(id: Uuid) -> ScheduleError {
    ScheduleError::NotFound(format!("Employee with ID {id} not found"))
}

#[async_trait]
impl AppointmentRepository for InMemoryRepository {
    async fn find_by_vehicle_and_date(
        &self,
        plate: &str,
        date: DateValue,
    ) -> ScheduleResult<Vec<Appointment>> {
        let store = self.store.lock().await;
        let mut found: Vec<Appointment> = store
            .appointments
            .values()
            .filter(|a| a.date == date && a.is_for_vehicle(plate))
            .cloned()
            .collect();
        found.sort_by_key(|a| (a.start_time, a.created_at));
        Ok(found)
    }

    async fn get(&self, id: Uuid) -> ScheduleResult<Option<Appointment>> {
        Ok(self.store.lock().await.appointments.get(&id).cloned())
    }

    async fn list(&self, filter: &AppointmentFilter) -> ScheduleResult<Vec<Appointment>> {
        let store = self.store.lock().await;
        let mut found: Vec<Appointment> = store
            .appointments
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        filter.sort(&mut found);
        Ok(found)
    }

    async fn create(&self, new: &NewAppointment) -> ScheduleResult<Appointment> {
        let mut store = self.store.lock().await;
        if store.is_taken(new, None) {
            return Err(ScheduleError::UniquenessViolation);
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            vehicle_id: new.vehicle_id,
            vehicle: new.vehicle.clone(),
            wash_type: new.wash_type,
            date: new.date,
            start_time: new.slot.start(),
            end_time: new.slot.end(),
            note: new.note.clone(),
            employees: new.employees.clone(),
            created_at: Utc::now(),
        };
        store.appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn update(
        &self,
        id: Uuid,
        new: &NewAppointment,
        guard: OverlapGuard,
    ) -> ScheduleResult<Appointment> {
        let mut store = self.store.lock().await;
        if !store.appointments.contains_key(&id) {
            return Err(appointment_not_found(id));
        }
        let taken = match guard {
            OverlapGuard::Enforce => store.is_taken(new, Some(id)),
            OverlapGuard::Skip => store.is_duplicate(new, id),
        };
        if taken {
            return Err(ScheduleError::UniquenessViolation);
        }

        let appointment = store
            .appointments
            .get_mut(&id)
            .ok_or_else(|| appointment_not_found(id))?;
        appointment.vehicle_id = new.vehicle_id;
        appointment.vehicle = new.vehicle.clone();
        appointment.wash_type = new.wash_type;
        appointment.date = new.date;
        appointment.start_time = new.slot.start();
        appointment.end_time = new.slot.end();
        appointment.note = new.note.clone();
        appointment.employees = new.employees.clone();
        Ok(appointment.clone())
    }

    async fn delete(&self, id: Uuid) -> ScheduleResult<()> {
        self.store
            .lock()
            .await
            .appointments
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| appointment_not_found(id))
    }
}

#[async_trait]
impl VehicleRepository for InMemoryRepository {
    async fn find_or_create_by_plate(&self, plate: &str) -> ScheduleResult<Vehicle> {
        let mut store = self.store.lock().await;
        if let Some(vehicle) = store.vehicle_by_plate(plate) {
            return Ok(vehicle.clone());
        }

        let placeholder = CreateVehicleRequest::placeholder(plate);
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            name: placeholder.name,
            brand: placeholder.brand,
            plate: placeholder.plate,
            color: placeholder.color,
        };
        store.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn create_vehicle(&self, request: &CreateVehicleRequest) -> ScheduleResult<Vehicle> {
        let mut store = self.store.lock().await;
        if store.vehicle_by_plate(&request.plate).is_some() {
            return Err(ScheduleError::Validation(format!(
                "A vehicle with plate {} already exists",
                request.plate.trim()
            )));
        }

        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            name: request.name.clone(),
            brand: request.brand.clone(),
            plate: request.plate.trim().to_string(),
            color: request.color.clone(),
        };
        store.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn get_vehicle(&self, id: Uuid) -> ScheduleResult<Option<Vehicle>> {
        Ok(self.store.lock().await.vehicles.get(&id).cloned())
    }

    async fn list_vehicles(&self) -> ScheduleResult<Vec<Vehicle>> {
        let mut vehicles: Vec<Vehicle> = self.store.lock().await.vehicles.values().cloned().collect();
        vehicles.sort_by(|a, b| a.plate.cmp(&b.plate));
        Ok(vehicles)
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryRepository {
    async fn create_employee(&self, request: &EmployeeRequest) -> ScheduleResult<Employee> {
        let employee = Employee {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
        };
        self.store
            .lock()
            .await
            .employees
            .insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn get_employee(&self, id: Uuid) -> ScheduleResult<Option<Employee>> {
        Ok(self.store.lock().await.employees.get(&id).cloned())
    }

    async fn list_employees(&self) -> ScheduleResult<Vec<Employee>> {
        let mut employees: Vec<Employee> =
            self.store.lock().await.employees.values().cloned().collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(employees)
    }

    async fn update_employee(
        &self,
        id: Uuid,
        request: &EmployeeRequest,
    ) -> ScheduleResult<Employee> {
        let mut store = self.store.lock().await;
        let employee = store
            .employees
            .get_mut(&id)
            .ok_or_else(|| employee_not_found(id))?;
        employee.name = request.name.trim().to_string();
        Ok(employee.clone())
    }

    async fn delete_employee(&self, id: Uuid) -> ScheduleResult<()> {
        let mut store = self.store.lock().await;
        store
            .employees
            .remove(&id)
            .ok_or_else(|| employee_not_found(id))?;
        for appointment in store.appointments.values_mut() {
            appointment.employees.retain(|employee| *employee != id);
        }
        Ok(())
    }
}
