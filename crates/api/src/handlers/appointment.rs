use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use lavagem_core::{
    errors::{ScheduleError, ScheduleResult},
    models::appointment::{
        Appointment, AppointmentFilter, AppointmentRequest, FreeSlotsResponse, WashType,
    },
    time::parse_date,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, handlers::payload, middleware::error_handling::AppError};

/// Query string for `GET /api/appointments`.
#[derive(Debug, Default, Deserialize)]
pub struct ListAppointmentsQuery {
    #[serde(default, alias = "veiculo")]
    pub vehicle: Option<String>,
    #[serde(default, alias = "tipo_lavagem")]
    pub wash_type: Option<String>,
    #[serde(default, alias = "data")]
    pub date: Option<String>,
    #[serde(default)]
    pub ordering: Option<String>,
}

impl ListAppointmentsQuery {
    /// Blank parameters count as absent.
    pub fn into_filter(self) -> ScheduleResult<AppointmentFilter> {
        let wash_type = non_blank(self.wash_type)
            .map(|raw| raw.parse::<WashType>())
            .transpose()?;
        let date = non_blank(self.date)
            .map(|raw| parse_date(&raw))
            .transpose()?;
        let ordering = match self.ordering {
            Some(raw) => AppointmentFilter::parse_ordering(&raw)?,
            None => AppointmentFilter::default_ordering(),
        };

        Ok(AppointmentFilter {
            vehicle: non_blank(self.vehicle).map(|plate| plate.trim().to_string()),
            wash_type,
            date,
            ordering,
        })
    }
}

/// Query string for `GET /api/appointments/free-slots`.
#[derive(Debug, Default, Deserialize)]
pub struct FreeSlotsQuery {
    #[serde(default, alias = "veiculo")]
    pub vehicle: Option<String>,
    #[serde(default, alias = "data")]
    pub date: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    body: Result<Json<AppointmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let request = payload(body)?;
    let appointment = state.scheduler.validate_and_create(request).await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListAppointmentsQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let filter = query.into_filter()?;
    let appointments = state.scheduler.list(&filter).await?;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    Ok(Json(state.scheduler.get(id).await?))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    body: Result<Json<AppointmentRequest>, JsonRejection>,
) -> Result<Json<Appointment>, AppError> {
    let request = payload(body)?;
    let appointment = state.scheduler.validate_and_update(id, request).await?;

    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.scheduler.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn free_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<FreeSlotsQuery>,
) -> Result<Json<FreeSlotsResponse>, AppError> {
    let vehicle = non_blank(query.vehicle);
    let date = non_blank(query.date);

    let (vehicle, date) = match (vehicle, date) {
        (Some(vehicle), Some(date)) => (vehicle, date),
        (vehicle, date) => {
            let missing = [("vehicle", vehicle.is_none()), ("date", date.is_none())]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
            return Err(AppError(ScheduleError::MissingField(missing)));
        }
    };

    let date = parse_date(&date)?;
    let free = state.scheduler.free_slots_for(&vehicle, date).await?;

    Ok(Json(FreeSlotsResponse {
        vehicle: vehicle.trim().to_string(),
        date,
        free_slots: free.iter().map(ToString::to_string).collect(),
    }))
}
