use axum::Json;
use chrono::{DateTime, Utc};
use mockall::predicate;
use uuid::Uuid;

use medisync_api::middleware::{auth::AuthUser, error_handling::AppError};
use medisync_core::{
    errors::ClinicError,
    models::{
        doctor::DoctorSummary,
        slot::{OpenSlotResponse, SlotResponse, SlotStatus},
        user::Role,
    },
};
use medisync_db::models::{DbOpenSlotRow, DbSlot};

use crate::test_utils::TestContext;

async fn test_add_slot_wrapper(
    ctx: &mut TestContext,
    auth_user: AuthUser,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<Json<SlotResponse>, AppError> {
    let auth_user = auth_user.require(Role::Doctor)?;

    if end_time <= start_time {
        return Err(AppError(ClinicError::Validation(
            "Slot end time must be after its start time".to_string(),
        )));
    }

    let slot = ctx
        .slot_repo
        .create_slot(auth_user.user_id, start_time, end_time)
        .await?;

    let status = slot.status.parse::<SlotStatus>()?;

    Ok(Json(SlotResponse {
        id: slot.id,
        start_time: slot.start_time,
        end_time: slot.end_time,
        status,
    }))
}

async fn test_open_slots_wrapper(
    ctx: &mut TestContext,
) -> Result<Json<Vec<OpenSlotResponse>>, AppError> {
    let slots = ctx.slot_repo.get_all_open_slots().await?;

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

#[tokio::test]
async fn test_add_slot_success() {
    let mut ctx = TestContext::new();
    let doctor_id = Uuid::new_v4();
    let start_time = Utc::now();
    let end_time = start_time + chrono::Duration::minutes(30);
    let now = Utc::now();

    ctx.slot_repo
        .expect_create_slot()
        .with(
            predicate::eq(doctor_id),
            predicate::eq(start_time),
            predicate::eq(end_time),
        )
        .times(1)
        .returning(move |doctor_id, start_time, end_time| {
            Ok(DbSlot {
                id: Uuid::new_v4(),
                doctor_id,
                start_time,
                end_time,
                status: "available".to_string(),
                created_at: now,
            })
        });

    let auth_user = AuthUser {
        user_id: doctor_id,
        role: Role::Doctor,
    };

    let result = test_add_slot_wrapper(&mut ctx, auth_user, start_time, end_time).await;

    let response = result.expect("slot creation should succeed").0;
    assert_eq!(response.start_time, start_time);
    assert_eq!(response.end_time, end_time);
    assert_eq!(response.status, SlotStatus::Available);
}

#[tokio::test]
async fn test_add_slot_rejects_patient_role() {
    let mut ctx = TestContext::new();
    let start_time = Utc::now();
    let end_time = start_time + chrono::Duration::minutes(30);

    ctx.slot_repo.expect_create_slot().times(0);

    let auth_user = AuthUser {
        user_id: Uuid::new_v4(),
        role: Role::Patient,
    };

    let result = test_add_slot_wrapper(&mut ctx, auth_user, start_time, end_time).await;

    match result.unwrap_err().0 {
        ClinicError::Authorization(_) => {} // Expected
        e => panic!("Expected Authorization error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_add_slot_rejects_inverted_time_range() {
    let mut ctx = TestContext::new();
    let start_time = Utc::now();
    let end_time = start_time - chrono::Duration::minutes(30);

    ctx.slot_repo.expect_create_slot().times(0);

    let auth_user = AuthUser {
        user_id: Uuid::new_v4(),
        role: Role::Doctor,
    };

    let result = test_add_slot_wrapper(&mut ctx, auth_user, start_time, end_time).await;

    match result.unwrap_err().0 {
        ClinicError::Validation(_) => {} // Expected
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_open_slots_projection() {
    let mut ctx = TestContext::new();
    let doctor_id = Uuid::new_v4();
    let now = Utc::now();

    ctx.slot_repo.expect_get_all_open_slots().returning(move || {
        Ok(vec![DbOpenSlotRow {
            id: Uuid::new_v4(),
            start_time: now,
            end_time: now + chrono::Duration::minutes(30),
            status: "available".to_string(),
            doctor_id,
            doctor_name: "Dr. Example".to_string(),
            doctor_email: "doctor@example.com".to_string(),
            specialty: Some("Dermatology".to_string()),
        }])
    });

    let result = test_open_slots_wrapper(&mut ctx).await;

    let response = result.expect("listing should succeed").0;
    assert_eq!(response.len(), 1);
    assert_eq!(response[0].status, SlotStatus::Available);
    assert_eq!(response[0].doctor.id, doctor_id);
    assert_eq!(response[0].doctor.specialty.as_deref(), Some("Dermatology"));
}
