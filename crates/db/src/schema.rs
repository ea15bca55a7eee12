use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create providers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS providers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id VARCHAR(255) NOT NULL UNIQUE,
            name VARCHAR(255) NOT NULL,
            business_name VARCHAR(255) NOT NULL,
            bio TEXT NULL,
            contact_email VARCHAR(255) NOT NULL,
            timezone VARCHAR(64) NOT NULL DEFAULT 'UTC',
            custom_url VARCHAR(255) NOT NULL UNIQUE,
            profile_image TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            provider_id UUID NOT NULL REFERENCES providers(id),
            name VARCHAR(255) NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            duration INTEGER NOT NULL,
            price BIGINT NOT NULL DEFAULT 0,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_duration CHECK (duration > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create business_hours table, one row per provider and weekday
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS business_hours (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            provider_id UUID NOT NULL REFERENCES providers(id),
            day_of_week SMALLINT NOT NULL,
            start_time VARCHAR(5) NOT NULL,
            end_time VARCHAR(5) NOT NULL,
            is_available BOOLEAN NOT NULL DEFAULT TRUE,
            CONSTRAINT valid_day_of_week CHECK (day_of_week BETWEEN 0 AND 6),
            CONSTRAINT one_schedule_per_day UNIQUE (provider_id, day_of_week)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            provider_id UUID NOT NULL REFERENCES providers(id),
            service_id UUID NOT NULL REFERENCES services(id),
            customer_name VARCHAR(255) NOT NULL,
            customer_email VARCHAR(255) NOT NULL,
            customer_phone VARCHAR(64) NOT NULL,
            date DATE NOT NULL,
            time VARCHAR(5) NOT NULL,
            notes TEXT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'confirmed',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('confirmed', 'cancelled', 'completed'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create form_fields table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS form_fields (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            provider_id UUID NOT NULL REFERENCES providers(id),
            service_id UUID NULL REFERENCES services(id),
            label VARCHAR(255) NOT NULL,
            field_type VARCHAR(16) NOT NULL,
            required BOOLEAN NOT NULL DEFAULT FALSE,
            placeholder VARCHAR(255) NULL,
            options TEXT[] NULL,
            default_value TEXT NULL,
            display_order INTEGER NOT NULL DEFAULT 0,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            CONSTRAINT valid_field_type CHECK (field_type IN
                ('text', 'number', 'email', 'phone', 'textarea', 'select', 'checkbox', 'radio'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create form_responses table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS form_responses (
            appointment_id UUID NOT NULL REFERENCES appointments(id),
            field_id UUID NOT NULL REFERENCES form_fields(id),
            value TEXT NOT NULL,
            PRIMARY KEY (appointment_id, field_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes, one statement per query
    const INDEXES: [&str; 6] = [
        "CREATE INDEX IF NOT EXISTS idx_services_provider_id ON services(provider_id)",
        "CREATE INDEX IF NOT EXISTS idx_business_hours_provider_id ON business_hours(provider_id)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_provider_date ON appointments(provider_id, date)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_service_id ON appointments(service_id)",
        "CREATE INDEX IF NOT EXISTS idx_form_fields_provider_id ON form_fields(provider_id)",
        "CREATE INDEX IF NOT EXISTS idx_form_fields_service_id ON form_fields(service_id)",
    ];
    for statement in INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
