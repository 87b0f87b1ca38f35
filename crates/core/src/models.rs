pub mod appointment;
pub mod employee;
pub mod vehicle;
