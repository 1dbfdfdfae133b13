use chrono::{DateTime, NaiveDate, Utc};
use medisync_core::errors::ClinicResult;
use medisync_core::models::user::Role;
use mockall::mock;
use uuid::Uuid;

use crate::models::{
    DbAppointment, DbDoctorAppointmentRow, DbDoctorRow, DbOpenSlotRow, DbPatientAppointmentRow,
    DbSlot, DbSpecialty, DbUser,
};

// Mock repositories for testing
mock! {
    pub UserRepo {
        pub async fn create_user(
            &self,
            name: &'static str,
            email: &'static str,
            password_hash: &'static str,
            citizen_id: &'static str,
            birth_date: NaiveDate,
            role: Role,
        ) -> eyre::Result<DbUser>;

        pub async fn create_doctor(
            &self,
            name: &'static str,
            email: &'static str,
            password_hash: &'static str,
            citizen_id: &'static str,
            birth_date: NaiveDate,
            specialty_id: Uuid,
            license_no: Option<&'static str>,
            bio: Option<&'static str>,
        ) -> eyre::Result<DbUser>;

        pub async fn get_user_by_email(
            &self,
            email: &'static str,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn get_user_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn update_profile(
            &self,
            id: Uuid,
            name: Option<&'static str>,
            phone: Option<&'static str>,
            address: Option<&'static str>,
        ) -> eyre::Result<DbUser>;

        pub async fn find_doctors(
            &self,
            specialty: Option<&'static str>,
        ) -> eyre::Result<Vec<DbDoctorRow>>;
    }
}

mock! {
    pub SpecialtyRepo {
        pub async fn list_specialties(&self) -> eyre::Result<Vec<DbSpecialty>>;

        pub async fn get_specialty_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbSpecialty>>;
    }
}

mock! {
    pub SlotRepo {
        pub async fn create_slot(
            &self,
            doctor_id: Uuid,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
        ) -> eyre::Result<DbSlot>;

        pub async fn get_open_slots_by_doctor(
            &self,
            doctor_id: Uuid,
        ) -> eyre::Result<Vec<DbSlot>>;

        pub async fn get_all_open_slots(&self) -> eyre::Result<Vec<DbOpenSlotRow>>;
    }
}

mock! {
    pub AppointmentRepo {
        pub async fn book_slot(
            &self,
            patient_id: Uuid,
            slot_id: Uuid,
        ) -> ClinicResult<DbAppointment>;

        pub async fn get_appointments_by_patient(
            &self,
            patient_id: Uuid,
        ) -> eyre::Result<Vec<DbPatientAppointmentRow>>;

        pub async fn get_appointments_by_doctor(
            &self,
            doctor_id: Uuid,
        ) -> eyre::Result<Vec<DbDoctorAppointmentRow>>;

        pub async fn appointments_report(
            &self,
            date: NaiveDate,
            doctor_id: Option<Uuid>,
        ) -> eyre::Result<Vec<DbAppointment>>;
    }
}
