//! # Lavagem core
//!
//! Domain types and scheduling rules for wash appointments: time and date
//! normalization, the business-hours policy, overlap detection, free-slot
//! calculation and the scheduler that ties them to a repository.

pub mod errors;
pub mod hours;
pub mod interval;
pub mod models;
pub mod repository;
pub mod scheduler;
pub mod slots;
pub mod time;
pub mod validation;
