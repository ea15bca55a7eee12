use crate::models::DbBusinessHours;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_business_hours_by_provider_id(
    pool: &Pool<Postgres>,
    provider_id: Uuid,
) -> Result<Vec<DbBusinessHours>> {
    let hours = sqlx::query_as::<_, DbBusinessHours>(
        r#"
        SELECT id, provider_id, day_of_week, start_time, end_time, is_available
        FROM business_hours
        WHERE provider_id = $1
        ORDER BY day_of_week ASC
        "#,
    )
    .bind(provider_id)
    .fetch_all(pool)
    .await?;

    Ok(hours)
}
