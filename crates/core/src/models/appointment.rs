use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{doctor::DoctorSummary, user::UserSummary};

/// Appointments are fact records; no cancellation transition exists, so
/// `booked` is the only state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Booked,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Booked => "booked",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub slot_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub slot_id: Uuid,
    pub doctor_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotWindow {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientAppointmentView {
    pub id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub slot: SlotWindow,
    pub doctor: DoctorSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorAppointmentView {
    pub id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub slot: SlotWindow,
    pub patient: UserSummary,
}
