use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use medisync_core::{
    errors::ClinicError,
    models::{
        appointment::{
            AppointmentResponse, BookAppointmentRequest, DoctorAppointmentView,
            PatientAppointmentView, SlotWindow,
        },
        doctor::DoctorSummary,
        user::{Role, UserSummary},
    },
};

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

/// Books a slot for the calling patient.
///
/// All preconditions (slot exists, slot still available) are re-checked
/// inside the booking transaction, so a stale slot listing can only
/// produce a 409, never a double booking.
#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<ApiState>>,
    auth_user: AuthUser,
    Json(payload): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentResponse>), AppError> {
    let auth_user = auth_user.require(Role::Patient)?;

    let appointment = medisync_db::repositories::appointment::book_slot(
        &state.db_pool,
        auth_user.user_id,
        payload.slot_id,
    )
    .await?;

    let response = AppointmentResponse {
        id: appointment.id,
        patient_id: appointment.patient_id,
        slot_id: appointment.slot_id,
        doctor_id: appointment.doctor_id,
        status: appointment.status,
        created_at: appointment.created_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn my_appointments(
    State(state): State<Arc<ApiState>>,
    auth_user: AuthUser,
) -> Result<Json<Vec<PatientAppointmentView>>, AppError> {
    let auth_user = auth_user.require(Role::Patient)?;

    let rows = medisync_db::repositories::appointment::get_appointments_by_patient(
        &state.db_pool,
        auth_user.user_id,
    )
    .await
    .map_err(ClinicError::Database)?;

    let response = rows
        .into_iter()
        .map(|row| PatientAppointmentView {
            id: row.id,
            status: row.status,
            created_at: row.created_at,
            slot: SlotWindow {
                id: row.slot_id,
                start_time: row.start_time,
                end_time: row.end_time,
            },
            doctor: DoctorSummary {
                id: row.doctor_id,
                name: row.doctor_name,
                email: row.doctor_email,
                specialty: row.specialty,
            },
        })
        .collect();

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn doctor_appointments(
    State(state): State<Arc<ApiState>>,
    auth_user: AuthUser,
) -> Result<Json<Vec<DoctorAppointmentView>>, AppError> {
    let auth_user = auth_user.require(Role::Doctor)?;

    let rows = medisync_db::repositories::appointment::get_appointments_by_doctor(
        &state.db_pool,
        auth_user.user_id,
    )
    .await
    .map_err(ClinicError::Database)?;

    let response = rows
        .into_iter()
        .map(|row| DoctorAppointmentView {
            id: row.id,
            status: row.status,
            created_at: row.created_at,
            slot: SlotWindow {
                id: row.slot_id,
                start_time: row.start_time,
                end_time: row.end_time,
            },
            patient: UserSummary {
                id: row.patient_id,
                name: row.patient_name,
                email: row.patient_email,
            },
        })
        .collect();

    Ok(Json(response))
}
