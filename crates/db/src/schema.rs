use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            citizen_id VARCHAR(64) NOT NULL UNIQUE,
            birth_date DATE NOT NULL,
            role VARCHAR(16) NOT NULL DEFAULT 'patient',
            status VARCHAR(16) NOT NULL DEFAULT 'active',
            phone VARCHAR(32) NULL,
            address TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create specialties table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS specialties (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL UNIQUE
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create doctor_profiles table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctor_profiles (
            user_id UUID PRIMARY KEY REFERENCES users(id),
            specialty_id UUID NOT NULL REFERENCES specialties(id),
            license_no VARCHAR(64) NULL,
            bio TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            doctor_id UUID NOT NULL REFERENCES users(id),
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'available',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table. The UNIQUE constraint on slot_id backs
    // the one-appointment-per-slot invariant at the storage level.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            patient_id UUID NOT NULL REFERENCES users(id),
            slot_id UUID NOT NULL UNIQUE REFERENCES slots(id),
            doctor_id UUID NOT NULL REFERENCES users(id),
            status VARCHAR(16) NOT NULL DEFAULT 'booked',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_users_role ON users(role);
        CREATE INDEX IF NOT EXISTS idx_doctor_profiles_specialty_id ON doctor_profiles(specialty_id);
        CREATE INDEX IF NOT EXISTS idx_slots_doctor_id ON slots(doctor_id);
        CREATE INDEX IF NOT EXISTS idx_slots_status ON slots(status);
        CREATE INDEX IF NOT EXISTS idx_slots_start_time ON slots(start_time);
        CREATE INDEX IF NOT EXISTS idx_appointments_patient_id ON appointments(patient_id);
        CREATE INDEX IF NOT EXISTS idx_appointments_doctor_id ON appointments(doctor_id);
        CREATE INDEX IF NOT EXISTS idx_appointments_created_at ON appointments(created_at);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}

pub async fn seed_specialties(pool: &Pool<Postgres>) -> Result<()> {
    info!("Seeding default specialties...");

    sqlx::query(
        r#"
        INSERT INTO specialties (name)
        VALUES
            ('General Practice'),
            ('Cardiology'),
            ('Dermatology'),
            ('Orthopedics'),
            ('Pediatrics'),
            ('Psychiatry')
        ON CONFLICT (name) DO NOTHING;
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
