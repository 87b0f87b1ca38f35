pub mod appointment;
pub mod employee;
pub mod health;
pub mod vehicle;
