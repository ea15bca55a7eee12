//! # Provider Handlers
//!
//! Public provider profile, plus the lookups every provider-scoped handler
//! starts with.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use slotbook_core::{
    errors::BookingError,
    models::{
        business_hours::{DaySchedule, WeeklyHours},
        form_field::FieldDefinition,
        provider::{GetProviderResponse, ServiceSummary},
    },
};
use slotbook_db::models::{DbProvider, DbService};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Returns a provider's public profile with its active services
///
/// # Endpoint
///
/// ```text
/// GET /api/providers/:custom_url
/// ```
///
/// # Errors
///
/// * `BookingError::NotFound` - No provider uses `custom_url`
/// * `BookingError::Database` - Database error
#[axum::debug_handler]
pub async fn get_provider(
    State(state): State<Arc<ApiState>>,
    Path(custom_url): Path<String>,
) -> Result<Json<GetProviderResponse>, AppError> {
    let provider = load_provider(&state, &custom_url).await?;

    let services = state
        .store
        .list_services(provider.id)
        .await?
        .iter()
        .filter(|service| service.is_active)
        .map(ServiceSummary::from)
        .collect();

    Ok(Json(GetProviderResponse {
        id: provider.id,
        name: provider.name,
        business_name: provider.business_name,
        bio: provider.bio,
        contact_email: provider.contact_email,
        timezone: provider.timezone,
        custom_url: provider.custom_url,
        profile_image: provider.profile_image,
        services,
    }))
}

pub(crate) async fn load_provider(state: &ApiState, custom_url: &str) -> Result<DbProvider, AppError> {
    state
        .store
        .find_provider_by_url(custom_url)
        .await?
        .ok_or_else(|| AppError(BookingError::NotFound(format!("Provider '{custom_url}' not found"))))
}

/// Inactive services are reported as missing.
pub(crate) async fn load_service(
    state: &ApiState,
    provider: &DbProvider,
    service_id: Uuid,
) -> Result<DbService, AppError> {
    state
        .store
        .find_service(provider.id, service_id)
        .await?
        .filter(|service| service.is_active)
        .ok_or_else(|| AppError(BookingError::NotFound(format!("Service {service_id} not found"))))
}

pub(crate) async fn load_weekly_hours(state: &ApiState, provider: &DbProvider) -> Result<WeeklyHours, AppError> {
    let rows = state.store.list_business_hours(provider.id).await?;
    Ok(WeeklyHours::from_schedules(rows.into_iter().map(DaySchedule::from)))
}

/// Loads the provider's field definitions, skipping rows with an unknown type.
pub(crate) async fn load_field_definitions(
    state: &ApiState,
    provider: &DbProvider,
) -> Result<Vec<FieldDefinition>, AppError> {
    let rows = state.store.list_form_fields(provider.id).await?;
    let definitions = rows
        .into_iter()
        .filter_map(|row| {
            let field_id = row.id;
            FieldDefinition::try_from(row)
                .inspect_err(|err| warn!(%field_id, %err, "skipping misconfigured form field"))
                .ok()
        })
        .collect();
    Ok(definitions)
}

/// Today's date in the provider's timezone, or in UTC when the stored zone
/// name is not a known IANA name.
pub(crate) fn provider_today(provider: &DbProvider) -> NaiveDate {
    let now = Utc::now();
    match provider.timezone.parse::<Tz>() {
        Ok(tz) => now.with_timezone(&tz).date_naive(),
        Err(_) => {
            warn!(timezone = %provider.timezone, "unknown provider timezone, using UTC");
            now.date_naive()
        }
    }
}
