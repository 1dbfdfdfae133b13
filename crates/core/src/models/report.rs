use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::appointment::AppointmentResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentsReport {
    pub date: NaiveDate,
    pub total_appointments: usize,
    pub appointments: Vec<AppointmentResponse>,
}
