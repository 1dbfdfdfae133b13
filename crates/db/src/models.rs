use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub citizen_id: String,
    pub birth_date: NaiveDate,
    pub role: String,
    pub status: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSpecialty {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDoctorProfile {
    pub user_id: Uuid,
    pub specialty_id: Uuid,
    pub license_no: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlot {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub slot_id: Uuid,
    pub doctor_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Doctor listing row, joined with the profile and specialty tables.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDoctorRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub specialty: Option<String>,
    pub license_no: Option<String>,
    pub bio: Option<String>,
}

/// Open slot row joined with the owning doctor and their specialty.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbOpenSlotRow {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub doctor_id: Uuid,
    pub doctor_name: String,
    pub doctor_email: String,
    pub specialty: Option<String>,
}

/// Patient-side appointment projection: slot window plus doctor identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPatientAppointmentRow {
    pub id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub slot_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub doctor_id: Uuid,
    pub doctor_name: String,
    pub doctor_email: String,
    pub specialty: Option<String>,
}

/// Doctor-side appointment projection: slot window plus patient identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDoctorAppointmentRow {
    pub id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub slot_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub patient_email: String,
}
