use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/users/me", get(handlers::user::get_me))
        .route("/api/users/me", put(handlers::user::update_me))
}
