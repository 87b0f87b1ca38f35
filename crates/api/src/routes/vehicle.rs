use axum::{
    Router,
    routing::get,
};
use std::sync::Arc;

use crate::{ApiState, handlers::vehicle};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/vehicles",
            get(vehicle::list_vehicles).post(vehicle::create_vehicle),
        )
        .route("/api/vehicles/:id", get(vehicle::get_vehicle))
}
