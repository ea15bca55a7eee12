use crate::models::DbService;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_services_by_provider_id(
    pool: &Pool<Postgres>,
    provider_id: Uuid,
) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, provider_id, name, description, duration, price, is_active, created_at
        FROM services
        WHERE provider_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(provider_id)
    .fetch_all(pool)
    .await?;

    Ok(services)
}

/// Only returns the service when it belongs to `provider_id`.
pub async fn get_service_for_provider(
    pool: &Pool<Postgres>,
    provider_id: Uuid,
    service_id: Uuid,
) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, provider_id, name, description, duration, price, is_active, created_at
        FROM services
        WHERE id = $1 AND provider_id = $2
        "#,
    )
    .bind(service_id)
    .bind(provider_id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}
