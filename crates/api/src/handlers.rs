pub mod appointment;
pub mod employee;
pub mod vehicle;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use lavagem_core::errors::ScheduleError;

use crate::middleware::error_handling::AppError;

/// Unwraps a JSON body, reporting malformed payloads in the shared error format.
pub(crate) fn payload<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError(ScheduleError::Validation(rejection.body_text())))
}
