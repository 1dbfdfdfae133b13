use axum::{extract::State, Json};
use std::sync::Arc;

use medisync_core::{
    errors::ClinicError,
    models::user::{Role, UpdateProfileRequest, UserProfileResponse},
};

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn get_me(
    State(state): State<Arc<ApiState>>,
    auth_user: AuthUser,
) -> Result<Json<UserProfileResponse>, AppError> {
    let user = medisync_db::repositories::user::get_user_by_id(&state.db_pool, auth_user.user_id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| {
            ClinicError::NotFound(format!("User with ID {} not found", auth_user.user_id))
        })?;

    let role = user.role.parse::<Role>()?;

    Ok(Json(UserProfileResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        role,
        status: user.status,
        phone: user.phone,
        address: user.address,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }))
}

#[axum::debug_handler]
pub async fn update_me(
    State(state): State<Arc<ApiState>>,
    auth_user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfileResponse>, AppError> {
    if let Some(name) = &payload.name {
        if name.trim().is_empty() {
            return Err(AppError(ClinicError::Validation(
                "Name may not be empty".to_string(),
            )));
        }
    }

    let user = medisync_db::repositories::user::update_profile(
        &state.db_pool,
        auth_user.user_id,
        payload.name.as_deref(),
        payload.phone.as_deref(),
        payload.address.as_deref(),
    )
    .await
    .map_err(ClinicError::Database)?;

    let role = user.role.parse::<Role>()?;

    Ok(Json(UserProfileResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        role,
        status: user.status,
        phone: user.phone,
        address: user.address,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }))
}
