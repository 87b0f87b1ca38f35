use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use lavagem_core::{
    errors::ScheduleError,
    models::vehicle::{CreateVehicleRequest, Vehicle, validate_plate},
    repository::VehicleRepository,
};
use uuid::Uuid;

use crate::{ApiState, handlers::payload, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn create_vehicle(
    State(state): State<Arc<ApiState>>,
    body: Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let mut request = payload(body)?;
    request.plate = validate_plate(&request.plate)?.to_string();

    let vehicle = state.repository.create_vehicle(&request).await?;

    Ok((StatusCode::CREATED, Json(vehicle)))
}

#[axum::debug_handler]
pub async fn list_vehicles(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    Ok(Json(state.repository.list_vehicles().await?))
}

#[axum::debug_handler]
pub async fn get_vehicle(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = state
        .repository
        .get_vehicle(id)
        .await?
        .ok_or_else(|| AppError(ScheduleError::NotFound(format!("Vehicle with ID {id} not found"))))?;

    Ok(Json(vehicle))
}
