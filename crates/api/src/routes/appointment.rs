use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments",
            post(handlers::appointment::book_appointment),
        )
        .route(
            "/api/appointments/me",
            get(handlers::appointment::my_appointments),
        )
        .route(
            "/api/appointments/doctor/me",
            get(handlers::appointment::doctor_appointments),
        )
}
