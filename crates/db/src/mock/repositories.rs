use async_trait::async_trait;
use lavagem_core::errors::ScheduleResult;
use lavagem_core::models::appointment::{
    Appointment, AppointmentFilter, NewAppointment, OverlapGuard,
};
use lavagem_core::models::employee::{Employee, EmployeeRequest};
use lavagem_core::models::vehicle::{CreateVehicleRequest, Vehicle};
use lavagem_core::repository::{AppointmentRepository, EmployeeRepository, VehicleRepository};
use lavagem_core::time::DateValue;
use mockall::mock;
use uuid::Uuid;

// Mock repository for testing
mock! {
    pub Repo {}

    #[async_trait]
    impl AppointmentRepository for Repo {
        async fn find_by_vehicle_and_date(
            &self,
            plate: &str,
            date: DateValue,
        ) -> ScheduleResult<Vec<Appointment>>;

        async fn get(&self, id: Uuid) -> ScheduleResult<Option<Appointment>>;

        async fn list(&self, filter: &AppointmentFilter) -> ScheduleResult<Vec<Appointment>>;

        async fn create(&self, appointment: &NewAppointment) -> ScheduleResult<Appointment>;

        async fn update(
            &self,
            id: Uuid,
            appointment: &NewAppointment,
            guard: OverlapGuard,
        ) -> ScheduleResult<Appointment>;

        async fn delete(&self, id: Uuid) -> ScheduleResult<()>;
    }

    #[async_trait]
    impl VehicleRepository for Repo {
        async fn find_or_create_by_plate(&self, plate: &str) -> ScheduleResult<Vehicle>;

        async fn create_vehicle(&self, vehicle: &CreateVehicleRequest) -> ScheduleResult<Vehicle>;

        async fn get_vehicle(&self, id: Uuid) -> ScheduleResult<Option<Vehicle>>;

        async fn list_vehicles(&self) -> ScheduleResult<Vec<Vehicle>>;
    }

    #[async_trait]
    impl EmployeeRepository for Repo {
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
}
