use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use lavagem_core::{
    errors::ScheduleError,
    models::employee::{Employee, EmployeeRequest},
    repository::EmployeeRepository,
};
use uuid::Uuid;

use crate::{ApiState, handlers::payload, middleware::error_handling::AppError};

fn validated(body: Result<Json<EmployeeRequest>, JsonRejection>) -> Result<EmployeeRequest, AppError> {
    let request = payload(body)?;
    if request.name.trim().is_empty() {
        return Err(AppError(ScheduleError::MissingField(vec!["name"])));
    }
    Ok(request)
}

fn not_found(id: Uuid) -> AppError {
    AppError(ScheduleError::NotFound(format!("Employee with ID {id} not found")))
}

#[axum::debug_handler]
pub async fn create_employee(
    State(state): State<Arc<ApiState>>,
    body: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), AppError> {
    let request = validated(body)?;
    let employee = state.repository.create_employee(&request).await?;

    Ok((StatusCode::CREATED, Json(employee)))
}

#[axum::debug_handler]
pub async fn list_employees(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Employee>>, AppError> {
    Ok(Json(state.repository.list_employees().await?))
}

#[axum::debug_handler]
pub async fn get_employee(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Employee>, AppError> {
    let employee = state
        .repository
        .get_employee(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(employee))
}

#[axum::debug_handler]
pub async fn update_employee(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    body: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Result<Json<Employee>, AppError> {
    let request = validated(body)?;

    Ok(Json(state.repository.update_employee(id, &request).await?))
}

#[axum::debug_handler]
pub async fn delete_employee(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.repository.delete_employee(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
