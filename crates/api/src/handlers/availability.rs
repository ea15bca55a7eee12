//! # Availability Handlers
//!
//! Exposes the slot generator and the day classifier for one provider service.
//!
//! Both endpoints load the provider's weekly hours and the time-reserving
//! appointments for the requested dates, then hand them to the pure engine
//! in `slotbook_core::availability`. Nothing is cached; every request is
//! recomputed from storage.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{Days, NaiveDate};
use serde::Deserialize;
use slotbook_core::{
    availability::{BookingCalendar, generate_slots, horizon_end},
    models::{
        appointment::BookedInterval,
        availability::{CalendarResponse, SlotsResponse},
    },
};
use std::{collections::HashMap, sync::Arc};
use uuid::Uuid;

use crate::{
    ApiState,
    handlers::provider::{load_provider, load_service, load_weekly_hours, provider_today},
    middleware::error_handling::AppError,
};

/// Days shown by the calendar when the client does not ask for a count.
pub const DEFAULT_CALENDAR_DAYS: u32 = 14;

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// First date shown; defaults to today in the provider's timezone
    pub start: Option<NaiveDate>,
    /// Number of days shown; defaults to 14 and never reaches past the horizon
    pub days: Option<u32>,
}

/// Lists the open start times for a service on one date
///
/// # Endpoint
///
/// ```text
/// GET /api/providers/:custom_url/services/:service_id/slots?date=2025-03-10
/// ```
///
/// Dates that cannot be booked (closed, before today, or past the booking
/// horizon) have no slots.
///
/// # Errors
///
/// * `BookingError::NotFound` - Unknown provider, or a service that is missing or inactive
/// * `BookingError::InvalidDuration` - The service has a non-positive duration
/// * `BookingError::Database` - Database error
#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<ApiState>>,
    Path((custom_url, service_id)): Path<(String, Uuid)>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let provider = load_provider(&state, &custom_url).await?;
    let service = load_service(&state, &provider, service_id).await?;
    let hours = load_weekly_hours(&state, &provider).await?;

    let calendar = BookingCalendar::new(&hours, provider_today(&provider))
        .with_classifier(state.classifier)
        .with_horizon(state.booking_horizon_days);

    let slots = if calendar.is_bookable(query.date) {
        let booked: Vec<BookedInterval> = state
            .store
            .booked_intervals(provider.id, query.date, query.date)
            .await?
            .into_iter()
            .map(BookedInterval::from)
            .collect();
        generate_slots(hours.for_date(query.date), service.duration, &booked)?
    } else {
        Vec::new()
    };

    tracing::debug!(
        provider_id = %provider.id,
        %service_id,
        date = %query.date,
        count = slots.len(),
        "generated slots"
    );

    Ok(Json(SlotsResponse {
        service_id,
        date: query.date,
        duration: service.duration,
        slots,
    }))
}

/// Classifies a run of consecutive days for a service
///
/// # Endpoint
///
/// ```text
/// GET /api/providers/:custom_url/services/:service_id/calendar?start=2025-03-10&days=14
/// ```
///
/// The number of days is capped so the calendar never extends past
/// `today + horizon`.
///
/// # Errors
///
/// * `BookingError::NotFound` - Unknown provider, or a service that is missing or inactive
/// * `BookingError::InvalidDuration` - The service has a non-positive duration
/// * `BookingError::Database` - Database error
#[axum::debug_handler]
pub async fn get_calendar(
    State(state): State<Arc<ApiState>>,
    Path((custom_url, service_id)): Path<(String, Uuid)>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let provider = load_provider(&state, &custom_url).await?;
    let service = load_service(&state, &provider, service_id).await?;
    let hours = load_weekly_hours(&state, &provider).await?;

    let today = provider_today(&provider);
    let start = query.start.unwrap_or(today);
    let count = calendar_length(
        start,
        today,
        query.days.unwrap_or(DEFAULT_CALENDAR_DAYS),
        state.booking_horizon_days,
    );

    let calendar = BookingCalendar::new(&hours, today)
        .with_classifier(state.classifier)
        .with_horizon(state.booking_horizon_days);

    let days = match count.checked_sub(1).and_then(|last| start.checked_add_days(Days::new(last))) {
        Some(end) => {
            let mut booked_by_date: HashMap<NaiveDate, Vec<BookedInterval>> = HashMap::new();
            for row in state.store.booked_intervals(provider.id, start, end).await? {
                booked_by_date
                    .entry(row.date)
                    .or_default()
                    .push(BookedInterval::from(row));
            }
            calendar.days(start, count as usize, service.duration, &booked_by_date)?
        }
        None => Vec::new(),
    };

    Ok(Json(CalendarResponse {
        service_id,
        today,
        days,
    }))
}

/// Number of days to show from `start`, stopping at `today + horizon_days`.
/// Never more than the horizon itself, however early `start` is.
pub(crate) fn calendar_length(start: NaiveDate, today: NaiveDate, requested: u32, horizon_days: u32) -> u64 {
    let last_bookable = horizon_end(today, horizon_days).unwrap_or(NaiveDate::MAX);
    let remaining = (last_bookable - start).num_days() + 1;
    u64::from(requested)
        .min(u64::from(horizon_days) + 1)
        .min(remaining.max(0) as u64)
}
