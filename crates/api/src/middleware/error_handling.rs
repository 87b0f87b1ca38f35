//! # Error Handling Middleware
//!
//! Maps scheduling errors to HTTP status codes and a JSON body shared by
//! every endpoint:
//!
//! ```json
//! {
//!   "error": "Time slot is already booked for this vehicle.",
//!   "messages": ["Time slot is already booked for this vehicle.", "Free slots: 10:00 - 18:00."],
//!   "free_slots": ["10:00 - 18:00"]
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lavagem_core::errors::ScheduleError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use lavagem_api::middleware::error_handling::AppError;
/// use lavagem_core::errors::ScheduleError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(ScheduleError::NotFound("Appointment".to_string())));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ScheduleError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            err if err.is_validation() => StatusCode::BAD_REQUEST,
            ScheduleError::NotFound(_) => StatusCode::NOT_FOUND,
            ScheduleError::SlotConflict { .. } | ScheduleError::UniquenessViolation => {
                StatusCode::CONFLICT
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Storage failures are logged with their cause and hidden from clients
        let (message, messages) = match &self.0 {
            ScheduleError::Database(report) => {
                error!(error = ?report, "request failed");
                let message = "Internal server error".to_string();
                (message.clone(), vec![message])
            }
            err => (err.to_string(), err.messages()),
        };

        let body = Json(json!({
            "error": message,
            "messages": messages,
            "free_slots": self.0.suggestions(),
        }));

        (status, body).into_response()
    }
}

/// Allows `?` on `ScheduleResult` in handlers returning `Result<_, AppError>`.
impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ScheduleError::Database(err))
    }
}
