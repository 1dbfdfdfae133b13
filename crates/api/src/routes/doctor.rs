use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/doctors", get(handlers::doctor::find_doctors))
        .route(
            "/api/doctors/slots",
            get(handlers::doctor::get_open_slots).post(handlers::doctor::add_slot),
        )
        .route("/api/doctors/:id/slots", get(handlers::doctor::get_doctor_slots))
}
