use axum::{extract::State, Json};
use std::sync::Arc;

use medisync_core::{errors::ClinicError, models::specialty::Specialty};

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn list_specialties(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Specialty>>, AppError> {
    let specialties =
        medisync_db::repositories::specialty::list_specialties(&state.db_pool)
            .await
            .map_err(ClinicError::Database)?;

    let response = specialties
        .into_iter()
        .map(|s| Specialty {
            id: s.id,
            name: s.name,
        })
        .collect();

    Ok(Json(response))
}
