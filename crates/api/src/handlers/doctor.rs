use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use medisync_core::{
    errors::ClinicError,
    models::{
        doctor::{DoctorResponse, DoctorSummary},
        slot::{CreateSlotRequest, OpenSlotResponse, SlotResponse, SlotStatus},
        user::Role,
    },
};

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

/// Query parameters for the doctor listing endpoint
#[derive(Debug, Deserialize)]
pub struct DoctorQuery {
    /// Optional specialty name filter (case-insensitive substring)
    pub specialty: Option<String>,
}

#[axum::debug_handler]
pub async fn find_doctors(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DoctorQuery>,
) -> Result<Json<Vec<DoctorResponse>>, AppError> {
    let doctors = medisync_db::repositories::user::find_doctors(
        &state.db_pool,
        query.specialty.as_deref(),
    )
    .await
    .map_err(ClinicError::Database)?;

    let response = doctors
        .into_iter()
        .map(|d| DoctorResponse {
            id: d.id,
            name: d.name,
            email: d.email,
            specialty: d.specialty,
            license_no: d.license_no,
            bio: d.bio,
        })
        .collect();

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn add_slot(
    State(state): State<Arc<ApiState>>,
    auth_user: AuthUser,
    Json(payload): Json<CreateSlotRequest>,
) -> Result<Json<SlotResponse>, AppError> {
    let auth_user = auth_user.require(Role::Doctor)?;

    if payload.end_time <= payload.start_time {
        return Err(AppError(ClinicError::Validation(
            "Slot end time must be after its start time".to_string(),
        )));
    }

    let slot = medisync_db::repositories::slot::create_slot(
        &state.db_pool,
        auth_user.user_id,
        payload.start_time,
        payload.end_time,
    )
    .await
    .map_err(ClinicError::Database)?;

    let status = slot.status.parse::<SlotStatus>()?;

    Ok(Json(SlotResponse {
        id: slot.id,
        start_time: slot.start_time,
        end_time: slot.end_time,
        status,
    }))
}

#[axum::debug_handler]
pub async fn get_doctor_slots(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Vec<SlotResponse>>, AppError> {
    let slots =
        medisync_db::repositories::slot::get_open_slots_by_doctor(&state.db_pool, doctor_id)
            .await
            .map_err(ClinicError::Database)?;

    let mut response = Vec::with_capacity(slots.len());
    for slot in slots {
        let status = slot.status.parse::<SlotStatus>()?;
        response.push(SlotResponse {
            id: slot.id,
            start_time: slot.start_time,
            end_time: slot.end_time,
            status,
        });
    }

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn get_open_slots(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<OpenSlotResponse>>, AppError> {
    let slots = medisync_db::repositories::slot::get_all_open_slots(&state.db_pool)
        .await
        .map_err(ClinicError::Database)?;

    let mut response = Vec::with_capacity(slots.len());
    for slot in slots {
        let status = slot.status.parse::<SlotStatus>()?;
        response.push(OpenSlotResponse {
            id: slot.id,
            start_time: slot.start_time,
            end_time: slot.end_time,
            status,
            doctor: DoctorSummary {
                id: slot.doctor_id,
                name: slot.doctor_name,
                email: slot.doctor_email,
                specialty: slot.specialty,
            },
        });
    }

    Ok(Json(response))
}
