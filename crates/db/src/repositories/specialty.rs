use crate::models::DbSpecialty;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_specialties(pool: &Pool<Postgres>) -> Result<Vec<DbSpecialty>> {
    let specialties = sqlx::query_as::<_, DbSpecialty>(
        r#"
        SELECT id, name
        FROM specialties
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(specialties)
}

pub async fn get_specialty_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSpecialty>> {
    let specialty = sqlx::query_as::<_, DbSpecialty>(
        r#"
        SELECT id, name
        FROM specialties
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(specialty)
}
