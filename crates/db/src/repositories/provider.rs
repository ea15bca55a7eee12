use crate::models::DbProvider;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_provider_by_url(
    pool: &Pool<Postgres>,
    custom_url: &str,
) -> Result<Option<DbProvider>> {
    tracing::debug!("Getting provider by custom url: {}", custom_url);

    let provider = sqlx::query_as::<_, DbProvider>(
        r#"
        SELECT id, user_id, name, business_name, bio, contact_email, timezone,
               custom_url, profile_image, created_at
        FROM providers
        WHERE custom_url = $1
        "#,
    )
    .bind(custom_url)
    .fetch_optional(pool)
    .await?;

    Ok(provider)
}
