use crate::models::{DbFormField, DbFormResponse};
use eyre::Result;
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

pub async fn get_form_fields_by_provider_id(
    pool: &Pool<Postgres>,
    provider_id: Uuid,
) -> Result<Vec<DbFormField>> {
    let fields = sqlx::query_as::<_, DbFormField>(
        r#"
        SELECT id, provider_id, service_id, label, field_type, required, placeholder,
               options, default_value, display_order, is_active
        FROM form_fields
        WHERE provider_id = $1
        ORDER BY display_order ASC
        "#,
    )
    .bind(provider_id)
    .fetch_all(pool)
    .await?;

    Ok(fields)
}

pub async fn create_form_response<'e>(
    executor: impl PgExecutor<'e>,
    appointment_id: Uuid,
    field_id: Uuid,
    value: &str,
) -> Result<DbFormResponse> {
    let response = sqlx::query_as::<_, DbFormResponse>(
        r#"
        INSERT INTO form_responses (appointment_id, field_id, value)
        VALUES ($1, $2, $3)
        RETURNING appointment_id, field_id, value
        "#,
    )
    .bind(appointment_id)
    .bind(field_id)
    .bind(value)
    .fetch_one(executor)
    .await?;

    Ok(response)
}
