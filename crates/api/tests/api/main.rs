mod test_utils;

mod appointment_test;
mod config_test;
mod employee_test;
mod middleware_test;
mod vehicle_test;
