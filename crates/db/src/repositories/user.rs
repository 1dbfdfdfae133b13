use crate::models::{DbDoctorRow, DbUser};
use chrono::{NaiveDate, Utc};
use eyre::Result;
use medisync_core::models::user::Role;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_user(
    pool: &Pool<Postgres>,
    name: &str,
    email: &str,
    password_hash: &str,
    citizen_id: &str,
    birth_date: NaiveDate,
    role: Role,
) -> Result<DbUser> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating user: id={}, email={}, role={}", id, email, role);

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (id, name, email, password_hash, citizen_id, birth_date, role, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'active', $8, $8)
        RETURNING id, name, email, password_hash, citizen_id, birth_date, role, status, phone, address, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(citizen_id)
    .bind(birth_date)
    .bind(role.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Creates the doctor user row and its profile in one transaction so a
/// doctor account never exists without its specialty binding.
pub async fn create_doctor(
    pool: &Pool<Postgres>,
    name: &str,
    email: &str,
    password_hash: &str,
    citizen_id: &str,
    birth_date: NaiveDate,
    specialty_id: Uuid,
    license_no: Option<&str>,
    bio: Option<&str>,
) -> Result<DbUser> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (id, name, email, password_hash, citizen_id, birth_date, role, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, 'doctor', 'active', $7, $7)
        RETURNING id, name, email, password_hash, citizen_id, birth_date, role, status, phone, address, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(citizen_id)
    .bind(birth_date)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO doctor_profiles (user_id, specialty_id, license_no, bio, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(specialty_id)
    .bind(license_no)
    .bind(bio)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(user)
}

pub async fn get_user_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, password_hash, citizen_id, birth_date, role, status, phone, address, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, password_hash, citizen_id, birth_date, role, status, phone, address, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn update_profile(
    pool: &Pool<Postgres>,
    id: Uuid,
    name: Option<&str>,
    phone: Option<&str>,
    address: Option<&str>,
) -> Result<DbUser> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        UPDATE users
        SET name = COALESCE($2, name),
            phone = COALESCE($3, phone),
            address = COALESCE($4, address),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, name, email, password_hash, citizen_id, birth_date, role, status, phone, address, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(phone)
    .bind(address)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn find_doctors(
    pool: &Pool<Postgres>,
    specialty: Option<&str>,
) -> Result<Vec<DbDoctorRow>> {
    let doctors = if let Some(specialty) = specialty {
        sqlx::query_as::<_, DbDoctorRow>(
            r#"
            SELECT u.id, u.name, u.email, s.name AS specialty, p.license_no, p.bio
            FROM users u
            LEFT JOIN doctor_profiles p ON p.user_id = u.id
            LEFT JOIN specialties s ON s.id = p.specialty_id
            WHERE u.role = 'doctor' AND s.name ILIKE '%' || $1 || '%'
            ORDER BY u.name ASC
            "#,
        )
        .bind(specialty)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, DbDoctorRow>(
            r#"
            SELECT u.id, u.name, u.email, s.name AS specialty, p.license_no, p.bio
            FROM users u
            LEFT JOIN doctor_profiles p ON p.user_id = u.id
            LEFT JOIN specialties s ON s.id = p.specialty_id
            WHERE u.role = 'doctor'
            ORDER BY u.name ASC
            "#,
        )
        .fetch_all(pool)
        .await?
    };

    Ok(doctors)
}
