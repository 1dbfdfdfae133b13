use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use medisync_core::{
    errors::ClinicError,
    models::{
        appointment::AppointmentResponse,
        report::AppointmentsReport,
        user::Role,
    },
};

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

/// Query parameters for the appointments report endpoint
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Calendar day to report on, formatted YYYY-MM-DD
    pub date: String,
}

/// Daily appointment report for admins and doctors.
///
/// Doctors are always narrowed to their own appointments; admins see all.
/// The date reaches the database as a bound parameter only.
#[axum::debug_handler]
pub async fn appointments_report(
    State(state): State<Arc<ApiState>>,
    auth_user: AuthUser,
    Query(query): Query<ReportQuery>,
) -> Result<Json<AppointmentsReport>, AppError> {
    let auth_user = auth_user.require_any(&[Role::Admin, Role::Doctor])?;

    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d").map_err(|_| {
        ClinicError::Validation("Invalid date, expected YYYY-MM-DD".to_string())
    })?;

    let doctor_filter = match auth_user.role {
        Role::Doctor => Some(auth_user.user_id),
        _ => None,
    };

    let appointments = medisync_db::repositories::appointment::appointments_report(
        &state.db_pool,
        date,
        doctor_filter,
    )
    .await
    .map_err(ClinicError::Database)?;

    let appointments: Vec<AppointmentResponse> = appointments
        .into_iter()
        .map(|a| AppointmentResponse {
            id: a.id,
            patient_id: a.patient_id,
            slot_id: a.slot_id,
            doctor_id: a.doctor_id,
            status: a.status,
            created_at: a.created_at,
        })
        .collect();

    let response = AppointmentsReport {
        date,
        total_appointments: appointments.len(),
        appointments,
    };

    Ok(Json(response))
}
