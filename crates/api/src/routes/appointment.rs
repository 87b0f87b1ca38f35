use axum::{
    Router,
    routing::get,
};
use std::sync::Arc;

use crate::{ApiState, handlers::appointment};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments",
            get(appointment::list_appointments).post(appointment::create_appointment),
        )
        .route("/api/appointments/free-slots", get(appointment::free_slots))
        .route(
            "/api/appointments/:id",
            get(appointment::get_appointment)
                .put(appointment::update_appointment)
                .delete(appointment::delete_appointment),
        )
}
