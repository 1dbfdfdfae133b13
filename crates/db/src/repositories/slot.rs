use crate::models::{DbOpenSlotRow, DbSlot};
use chrono::{DateTime, Utc};
use eyre::Result;
use medisync_core::models::slot::SlotStatus;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_slot(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<DbSlot> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        INSERT INTO slots (id, doctor_id, start_time, end_time, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, doctor_id, start_time, end_time, status, created_at
        "#,
    )
    .bind(id)
    .bind(doctor_id)
    .bind(start_time)
    .bind(end_time)
    .bind(SlotStatus::Available.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(slot)
}

pub async fn get_open_slots_by_doctor(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
) -> Result<Vec<DbSlot>> {
    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, doctor_id, start_time, end_time, status, created_at
        FROM slots
        WHERE doctor_id = $1 AND status = 'available'
        ORDER BY start_time ASC
        "#,
    )
    .bind(doctor_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn get_all_open_slots(pool: &Pool<Postgres>) -> Result<Vec<DbOpenSlotRow>> {
    let slots = sqlx::query_as::<_, DbOpenSlotRow>(
        r#"
        SELECT sl.id, sl.start_time, sl.end_time, sl.status,
               u.id AS doctor_id, u.name AS doctor_name, u.email AS doctor_email,
               s.name AS specialty
        FROM slots sl
        JOIN users u ON u.id = sl.doctor_id
        LEFT JOIN doctor_profiles p ON p.user_id = u.id
        LEFT JOIN specialties s ON s.id = p.specialty_id
        WHERE sl.status = 'available'
        ORDER BY sl.start_time ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(slots)
}
