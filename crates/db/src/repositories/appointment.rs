use crate::models::{DbAppointment, DbDoctorAppointmentRow, DbPatientAppointmentRow, DbSlot};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use eyre::Result;
use medisync_core::errors::{ClinicError, ClinicResult};
use medisync_core::models::{appointment::AppointmentStatus, slot::SlotStatus};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Atomically claims `slot_id` for `patient_id`.
///
/// The whole check-and-claim runs inside one transaction. The initial
/// `SELECT ... FOR UPDATE` serializes concurrent attempts on the same slot
/// row, so of two racing callers exactly one observes `available`; the
/// other blocks until commit and then fails with `Conflict`. The durable
/// store is the sole arbiter of the race; no in-process locking is
/// involved, so the guarantee holds across service instances.
///
/// Any early return drops the transaction, which rolls back both writes.
pub async fn book_slot(
    pool: &Pool<Postgres>,
    patient_id: Uuid,
    slot_id: Uuid,
) -> ClinicResult<DbAppointment> {
    if patient_id.is_nil() {
        return Err(ClinicError::Validation(
            "A patient identity is required to book a slot".to_string(),
        ));
    }

    let mut tx = pool.begin().await.map_err(store_error)?;

    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, doctor_id, start_time, end_time, status, created_at
        FROM slots
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(slot_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(store_error)?;

    let Some(slot) = slot else {
        return Err(ClinicError::NotFound(format!(
            "Slot with ID {slot_id} not found"
        )));
    };

    if slot.status != SlotStatus::Available.as_str() {
        return Err(ClinicError::Conflict(
            "Slot is no longer available".to_string(),
        ));
    }

    let appointment_id = Uuid::new_v4();
    let now = Utc::now();

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (id, patient_id, slot_id, doctor_id, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, patient_id, slot_id, doctor_id, status, created_at
        "#,
    )
    .bind(appointment_id)
    .bind(patient_id)
    .bind(slot_id)
    .bind(slot.doctor_id)
    .bind(AppointmentStatus::Booked.as_str())
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(store_error)?;

    // Conditional flip: must change exactly one row that is still
    // `available`, otherwise the claim loses and everything rolls back.
    let updated = sqlx::query(
        r#"
        UPDATE slots
        SET status = $2
        WHERE id = $1 AND status = $3
        "#,
    )
    .bind(slot_id)
    .bind(SlotStatus::Booked.as_str())
    .bind(SlotStatus::Available.as_str())
    .execute(&mut *tx)
    .await
    .map_err(store_error)?;

    if updated.rows_affected() != 1 {
        return Err(ClinicError::Conflict(
            "Slot is no longer available".to_string(),
        ));
    }

    tx.commit().await.map_err(store_error)?;

    tracing::debug!(
        "Booked slot: appointment={}, patient={}, slot={}",
        appointment.id,
        patient_id,
        slot_id
    );

    Ok(appointment)
}

pub async fn get_appointments_by_patient(
    pool: &Pool<Postgres>,
    patient_id: Uuid,
) -> Result<Vec<DbPatientAppointmentRow>> {
    let appointments = sqlx::query_as::<_, DbPatientAppointmentRow>(
        r#"
        SELECT a.id, a.status, a.created_at,
               sl.id AS slot_id, sl.start_time, sl.end_time,
               u.id AS doctor_id, u.name AS doctor_name, u.email AS doctor_email,
               s.name AS specialty
        FROM appointments a
        JOIN slots sl ON sl.id = a.slot_id
        JOIN users u ON u.id = a.doctor_id
        LEFT JOIN doctor_profiles p ON p.user_id = u.id
        LEFT JOIN specialties s ON s.id = p.specialty_id
        WHERE a.patient_id = $1
        ORDER BY a.created_at DESC
        "#,
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn get_appointments_by_doctor(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
) -> Result<Vec<DbDoctorAppointmentRow>> {
    let appointments = sqlx::query_as::<_, DbDoctorAppointmentRow>(
        r#"
        SELECT a.id, a.status, a.created_at,
               sl.id AS slot_id, sl.start_time, sl.end_time,
               u.id AS patient_id, u.name AS patient_name, u.email AS patient_email
        FROM appointments a
        JOIN slots sl ON sl.id = a.slot_id
        JOIN users u ON u.id = a.patient_id
        WHERE a.doctor_id = $1
        ORDER BY a.created_at DESC
        "#,
    )
    .bind(doctor_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Appointments created on the given calendar day, optionally narrowed to
/// one doctor. The date arrives as a bound parameter, never spliced into
/// the query text.
pub async fn appointments_report(
    pool: &Pool<Postgres>,
    date: NaiveDate,
    doctor_id: Option<Uuid>,
) -> Result<Vec<DbAppointment>> {
    let (day_start, day_end) = day_range(date);

    let appointments = if let Some(doctor_id) = doctor_id {
        sqlx::query_as::<_, DbAppointment>(
            r#"
            SELECT id, patient_id, slot_id, doctor_id, status, created_at
            FROM appointments
            WHERE created_at >= $1 AND created_at < $2 AND doctor_id = $3
            ORDER BY created_at ASC
            "#,
        )
        .bind(day_start)
        .bind(day_end)
        .bind(doctor_id)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, DbAppointment>(
            r#"
            SELECT id, patient_id, slot_id, doctor_id, status, created_at
            FROM appointments
            WHERE created_at >= $1 AND created_at < $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(day_start)
        .bind(day_end)
        .fetch_all(pool)
        .await?
    };

    Ok(appointments)
}

/// Half-open UTC range covering one calendar day.
fn day_range(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let day_start = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
    let day_end = day_start + Duration::days(1);
    (day_start, day_end)
}

/// Maps storage failures onto the clinic taxonomy. Pool exhaustion and
/// connection loss are retryable from scratch; a unique violation on
/// `appointments.slot_id` means the slot was claimed by a committed
/// competitor.
fn store_error(err: sqlx::Error) -> ClinicError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ClinicError::Conflict("Slot is no longer available".to_string())
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::WorkerCrashed => {
            ClinicError::Transient("connection pool unavailable".to_string())
        }
        sqlx::Error::Io(io) => ClinicError::Transient(io.to_string()),
        other => ClinicError::Database(eyre::Report::new(other)),
    }
}
