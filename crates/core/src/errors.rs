use thiserror::Error;

use crate::interval::Interval;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Required fields: {}.", .0.join(", "))]
    MissingField(Vec<&'static str>),

    #[error("Invalid date format: '{0}'. Use DD/MM/YYYY.")]
    InvalidDateFormat(String),

    #[error("Invalid time format: '{0}'. Use HH:MM or HH:MM:SS.")]
    InvalidTimeFormat(String),

    #[error("Start time {start} must be before end time {end}.")]
    InvalidOrdering { start: String, end: String },

    #[error("Appointments must be scheduled between {}.", .window.display_range())]
    OutOfHours { window: Interval },

    #[error("Time slot is already booked for this vehicle.")]
    SlotConflict { free_slots: Vec<Interval> },

    #[error("Time slot was booked by a concurrent request.")]
    UniquenessViolation,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),
}

impl ScheduleError {
    /// Human-readable messages for the caller, most important first.
    ///
    /// A slot conflict carries one extra line listing the free slots of the
    /// day, or saying that none remain.
    pub fn messages(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        if let ScheduleError::SlotConflict { free_slots } = self {
            if free_slots.is_empty() {
                messages.push("No free slots remain on this date.".to_string());
            } else {
                messages.push(format!("Free slots: {}.", self.suggestions().join(", ")));
            }
        }
        messages
    }

    /// Free slots formatted as `HH:MM - HH:MM`; empty for every other error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            ScheduleError::SlotConflict { free_slots } => {
                free_slots.iter().map(Interval::display_range).collect()
            }
            _ => Vec::new(),
        }
    }

    /// True for errors produced by the validation gates, which the caller
    /// can fix by resubmitting different input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ScheduleError::MissingField(_)
                | ScheduleError::InvalidDateFormat(_)
                | ScheduleError::InvalidTimeFormat(_)
                | ScheduleError::InvalidOrdering { .. }
                | ScheduleError::OutOfHours { .. }
                | ScheduleError::Validation(_)
        )
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
