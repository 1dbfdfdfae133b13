use axum::Json;
use chrono::Utc;
use mockall::predicate;
use uuid::Uuid;

use medisync_api::middleware::{auth::AuthUser, error_handling::AppError};
use medisync_core::{
    errors::ClinicError,
    models::{
        appointment::{AppointmentResponse, PatientAppointmentView, SlotWindow},
        doctor::DoctorSummary,
        user::Role,
    },
};
use medisync_db::models::{DbAppointment, DbPatientAppointmentRow};

use crate::test_utils::TestContext;

// Test wrappers that replay the handler logic against mock repositories.

async fn test_book_appointment_wrapper(
    ctx: &mut TestContext,
    auth_user: AuthUser,
    slot_id: Uuid,
) -> Result<Json<AppointmentResponse>, AppError> {
    let auth_user = auth_user.require(Role::Patient)?;

    let appointment = ctx
        .appointment_repo
        .book_slot(auth_user.user_id, slot_id)
        .await?;

    Ok(Json(AppointmentResponse {
        id: appointment.id,
        patient_id: appointment.patient_id,
        slot_id: appointment.slot_id,
        doctor_id: appointment.doctor_id,
        status: appointment.status,
        created_at: appointment.created_at,
    }))
}

async fn test_my_appointments_wrapper(
    ctx: &mut TestContext,
    auth_user: AuthUser,
) -> Result<Json<Vec<PatientAppointmentView>>, AppError> {
    let auth_user = auth_user.require(Role::Patient)?;

    let rows = ctx
        .appointment_repo
        .get_appointments_by_patient(auth_user.user_id)
        .await?;

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

#[tokio::test]
async fn test_book_appointment_success() {
    let mut ctx = TestContext::new();
    let patient_id = Uuid::new_v4();
    let doctor_id = Uuid::new_v4();
    let slot_id = Uuid::new_v4();
    let now = Utc::now();

    ctx.appointment_repo
        .expect_book_slot()
        .with(predicate::eq(patient_id), predicate::eq(slot_id))
        .times(1)
        .returning(move |patient_id, slot_id| {
            Ok(DbAppointment {
                id: Uuid::new_v4(),
                patient_id,
                slot_id,
                doctor_id,
                status: "booked".to_string(),
                created_at: now,
            })
        });

    let auth_user = AuthUser {
        user_id: patient_id,
        role: Role::Patient,
    };

    let result = test_book_appointment_wrapper(&mut ctx, auth_user, slot_id).await;

    let response = result.expect("booking should succeed").0;
    assert_eq!(response.patient_id, patient_id);
    assert_eq!(response.slot_id, slot_id);
    assert_eq!(response.status, "booked");
    // The appointment always carries the doctor that owns the slot
    assert_eq!(response.doctor_id, doctor_id);
}

#[tokio::test]
async fn test_book_appointment_conflict_when_slot_taken() {
    let mut ctx = TestContext::new();
    let patient_id = Uuid::new_v4();
    let slot_id = Uuid::new_v4();

    ctx.appointment_repo
        .expect_book_slot()
        .with(predicate::eq(patient_id), predicate::eq(slot_id))
        .times(1)
        .returning(|_, _| {
            Err(ClinicError::Conflict(
                "Slot is no longer available".to_string(),
            ))
        });

    let auth_user = AuthUser {
        user_id: patient_id,
        role: Role::Patient,
    };

    let result = test_book_appointment_wrapper(&mut ctx, auth_user, slot_id).await;

    match result.unwrap_err().0 {
        ClinicError::Conflict(_) => {} // Expected
        e => panic!("Expected Conflict error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_book_appointment_unknown_slot_is_not_found() {
    let mut ctx = TestContext::new();
    let patient_id = Uuid::new_v4();
    let slot_id = Uuid::new_v4();

    // A missing slot must surface as NotFound, never as Conflict
    ctx.appointment_repo
        .expect_book_slot()
        .with(predicate::eq(patient_id), predicate::eq(slot_id))
        .times(1)
        .returning(move |_, slot_id| {
            Err(ClinicError::NotFound(format!(
                "Slot with ID {slot_id} not found"
            )))
        });

    let auth_user = AuthUser {
        user_id: patient_id,
        role: Role::Patient,
    };

    let result = test_book_appointment_wrapper(&mut ctx, auth_user, slot_id).await;

    match result.unwrap_err().0 {
        ClinicError::NotFound(_) => {} // Expected
        e => panic!("Expected NotFound error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_book_appointment_rejects_non_patient() {
    let mut ctx = TestContext::new();
    let doctor_id = Uuid::new_v4();
    let slot_id = Uuid::new_v4();

    // The repository must never be reached when the role check fails
    ctx.appointment_repo.expect_book_slot().times(0);

    let auth_user = AuthUser {
        user_id: doctor_id,
        role: Role::Doctor,
    };

    let result = test_book_appointment_wrapper(&mut ctx, auth_user, slot_id).await;

    match result.unwrap_err().0 {
        ClinicError::Authorization(_) => {} // Expected
        e => panic!("Expected Authorization error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_my_appointments_listing() {
    let mut ctx = TestContext::new();
    let patient_id = Uuid::new_v4();
    let doctor_id = Uuid::new_v4();
    let slot_id = Uuid::new_v4();
    let now = Utc::now();

    ctx.appointment_repo
        .expect_get_appointments_by_patient()
        .with(predicate::eq(patient_id))
        .returning(move |_| {
            Ok(vec![DbPatientAppointmentRow {
                id: Uuid::new_v4(),
                status: "booked".to_string(),
                created_at: now,
                slot_id,
                start_time: now,
                end_time: now + chrono::Duration::minutes(30),
                doctor_id,
                doctor_name: "Dr. Example".to_string(),
                doctor_email: "doctor@example.com".to_string(),
                specialty: Some("Cardiology".to_string()),
            }])
        });

    let auth_user = AuthUser {
        user_id: patient_id,
        role: Role::Patient,
    };

    let result = test_my_appointments_wrapper(&mut ctx, auth_user).await;

    let response = result.expect("listing should succeed").0;
    assert_eq!(response.len(), 1);
    assert_eq!(response[0].slot.id, slot_id);
    assert_eq!(response[0].doctor.id, doctor_id);
    assert_eq!(response[0].doctor.specialty.as_deref(), Some("Cardiology"));
}

#[tokio::test]
async fn test_my_appointments_read_is_idempotent() {
    let mut ctx = TestContext::new();
    let patient_id = Uuid::new_v4();
    let appointment_id = Uuid::new_v4();
    let slot_id = Uuid::new_v4();
    let doctor_id = Uuid::new_v4();
    let now = Utc::now();

    // Two reads with no intervening booking return the same set
    ctx.appointment_repo
        .expect_get_appointments_by_patient()
        .with(predicate::eq(patient_id))
        .times(2)
        .returning(move |_| {
            Ok(vec![DbPatientAppointmentRow {
                id: appointment_id,
                status: "booked".to_string(),
                created_at: now,
                slot_id,
                start_time: now,
                end_time: now + chrono::Duration::minutes(30),
                doctor_id,
                doctor_name: "Dr. Example".to_string(),
                doctor_email: "doctor@example.com".to_string(),
                specialty: None,
            }])
        });

    let auth_user = AuthUser {
        user_id: patient_id,
        role: Role::Patient,
    };

    let first = test_my_appointments_wrapper(&mut ctx, auth_user).await.unwrap().0;
    let second = test_my_appointments_wrapper(&mut ctx, auth_user).await.unwrap().0;

    assert_eq!(first.len(), second.len());
    assert_eq!(first[0].id, second[0].id);
    assert_eq!(first[0].slot.id, second[0].slot.id);
}

#[tokio::test]
async fn test_my_appointments_rejects_doctor_role() {
    let mut ctx = TestContext::new();

    ctx.appointment_repo
        .expect_get_appointments_by_patient()
        .times(0);

    let auth_user = AuthUser {
        user_id: Uuid::new_v4(),
        role: Role::Doctor,
    };

    let result = test_my_appointments_wrapper(&mut ctx, auth_user).await;

    match result.unwrap_err().0 {
        ClinicError::Authorization(_) => {} // Expected
        e => panic!("Expected Authorization error, got: {:?}", e),
    }
}
