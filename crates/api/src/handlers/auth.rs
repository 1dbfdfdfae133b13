use axum::{extract::State, Json};
use std::sync::Arc;

use medisync_core::{
    errors::ClinicError,
    models::user::{
        LoginRequest, LoginResponse, RegisterDoctorRequest, RegisterRequest, RegisterResponse,
        Role, TokenIdentityResponse, UserSummary,
    },
};

use crate::{
    middleware::{
        auth::{self, AuthUser},
        error_handling::AppError,
    },
    ApiState,
};

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    validate_registration(&payload.name, &payload.email, &payload.password, &payload.citizen_id)?;

    // Reject duplicate emails before hashing
    let existing = medisync_db::repositories::user::get_user_by_email(&state.db_pool, &payload.email)
        .await
        .map_err(ClinicError::Database)?;
    if existing.is_some() {
        return Err(AppError(ClinicError::Validation(
            "Email already registered".to_string(),
        )));
    }

    let password_hash = auth::hash_password(&payload.password)?;

    let user = medisync_db::repositories::user::create_user(
        &state.db_pool,
        &payload.name,
        &payload.email,
        &password_hash,
        &payload.citizen_id,
        payload.birth_date,
        Role::Patient,
    )
    .await
    .map_err(ClinicError::Database)?;

    let response = RegisterResponse {
        message: "Register success".to_string(),
        user: UserSummary {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn register_doctor(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterDoctorRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    validate_registration(&payload.name, &payload.email, &payload.password, &payload.citizen_id)?;

    let existing = medisync_db::repositories::user::get_user_by_email(&state.db_pool, &payload.email)
        .await
        .map_err(ClinicError::Database)?;
    if existing.is_some() {
        return Err(AppError(ClinicError::Validation(
            "Email already registered".to_string(),
        )));
    }

    // The specialty binding must resolve before the account is created
    medisync_db::repositories::specialty::get_specialty_by_id(&state.db_pool, payload.specialty_id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| {
            ClinicError::NotFound(format!(
                "Specialty with ID {} not found",
                payload.specialty_id
            ))
        })?;

    let password_hash = auth::hash_password(&payload.password)?;

    let user = medisync_db::repositories::user::create_doctor(
        &state.db_pool,
        &payload.name,
        &payload.email,
        &password_hash,
        &payload.citizen_id,
        payload.birth_date,
        payload.specialty_id,
        payload.license_no.as_deref(),
        payload.bio.as_deref(),
    )
    .await
    .map_err(ClinicError::Database)?;

    let response = RegisterResponse {
        message: "Register success".to_string(),
        user: UserSummary {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = medisync_db::repositories::user::get_user_by_email(&state.db_pool, &payload.email)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| {
            ClinicError::Authentication("Invalid email or password".to_string())
        })?;

    let is_valid = auth::verify_password(&user.password_hash, &payload.password)?;
    if !is_valid {
        return Err(AppError(ClinicError::Authentication(
            "Invalid email or password".to_string(),
        )));
    }

    let role = user.role.parse::<Role>()?;
    let token = auth::issue_token(&state.jwt_secret, user.id, role, state.token_ttl_minutes)?;

    let response = LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        user: UserSummary {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn refresh(
    State(state): State<Arc<ApiState>>,
    auth_user: AuthUser,
) -> Result<Json<LoginResponse>, AppError> {
    // Re-check the account before extending its session
    let user = medisync_db::repositories::user::get_user_by_id(&state.db_pool, auth_user.user_id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| {
            ClinicError::Authentication("Account no longer exists".to_string())
        })?;

    if user.status != "active" {
        return Err(AppError(ClinicError::Authentication(
            "Account is not active".to_string(),
        )));
    }

    let role = user.role.parse::<Role>()?;
    let token = auth::issue_token(&state.jwt_secret, user.id, role, state.token_ttl_minutes)?;

    let response = LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        user: UserSummary {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    };

    Ok(Json(response))
}

pub async fn profile(auth_user: AuthUser) -> Json<TokenIdentityResponse> {
    Json(TokenIdentityResponse {
        user_id: auth_user.user_id,
        role: auth_user.role,
    })
}

fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    citizen_id: &str,
) -> Result<(), ClinicError> {
    if name.trim().is_empty() {
        return Err(ClinicError::Validation("Name is required".to_string()));
    }
    if !email.contains('@') {
        return Err(ClinicError::Validation(
            "Invalid email address".to_string(),
        ));
    }
    if password.len() < 6 {
        return Err(ClinicError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    if citizen_id.trim().is_empty() {
        return Err(ClinicError::Validation(
            "Citizen ID is required".to_string(),
        ));
    }
    Ok(())
}
