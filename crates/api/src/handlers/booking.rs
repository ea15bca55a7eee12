//! # Booking Handlers
//!
//! The booking form for a service and the submission endpoint.
//!
//! A submission is accepted in three stages:
//!
//! 1. Validate the fixed customer fields and the provider's custom fields,
//!    collecting every problem into one 422 response.
//! 2. Check the requested date is bookable and the time is one of the slots
//!    generated for that date.
//! 3. Ask the store to insert the appointment. The store re-checks the
//!    interval under a provider lock, so two customers racing for the same
//!    slot cannot both succeed.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use slotbook_core::{
    availability::{BookingCalendar, generate_slots},
    errors::BookingError,
    models::{
        appointment::{BookedInterval, CreateBookingRequest, CreateBookingResponse},
        form_field::FieldDescriptor,
    },
    time_of_day::TimeOfDay,
    validation::{fields_for_service, validate_booking},
};
use slotbook_db::{BookingOutcome, NewAppointment};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    ApiState,
    handlers::provider::{
        load_field_definitions, load_provider, load_service, load_weekly_hours, provider_today,
    },
    middleware::error_handling::AppError,
};

/// Lists the custom fields shown on the booking form of a service
///
/// # Endpoint
///
/// ```text
/// GET /api/providers/:custom_url/services/:service_id/fields
/// ```
///
/// Returns active fields that apply to every service or to this one, in
/// display order.
#[axum::debug_handler]
pub async fn get_fields(
    State(state): State<Arc<ApiState>>,
    Path((custom_url, service_id)): Path<(String, Uuid)>,
) -> Result<Json<Vec<FieldDescriptor>>, AppError> {
    let provider = load_provider(&state, &custom_url).await?;
    let service = load_service(&state, &provider, service_id).await?;
    let definitions = load_field_definitions(&state, &provider).await?;

    let fields = fields_for_service(&definitions, service.id)
        .iter()
        .map(FieldDescriptor::from)
        .collect();

    Ok(Json(fields))
}

/// Books a service for a customer
///
/// # Endpoint
///
/// ```text
/// POST /api/providers/:custom_url/services/:service_id/bookings
/// ```
///
/// # Errors
///
/// * `BookingError::NotFound` - Unknown provider, or a service that is missing or inactive
/// * `BookingError::ValidationFailed` - One or more form fields are invalid (422)
/// * `BookingError::Validation` - The date cannot be booked, or the time is not a slot start
/// * `BookingError::Conflict` - The slot is already taken (409)
/// * `BookingError::Database` - Database error
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Path((custom_url, service_id)): Path<(String, Uuid)>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), AppError> {
    let provider = load_provider(&state, &custom_url).await?;
    let service = load_service(&state, &provider, service_id).await?;
    let definitions = load_field_definitions(&state, &provider).await?;
    let fields = fields_for_service(&definitions, service.id);

    let start = validate_booking(&request, &fields).map_err(BookingError::ValidationFailed)?;

    let hours = load_weekly_hours(&state, &provider).await?;
    let calendar = BookingCalendar::new(&hours, provider_today(&provider))
        .with_horizon(state.booking_horizon_days);
    if !calendar.is_bookable(request.date) {
        return Err(AppError(BookingError::Validation(format!(
            "{} is not available for booking",
            request.date
        ))));
    }

    let schedule = hours.for_date(request.date);
    if !generate_slots(schedule, service.duration, &[])?.contains(&start) {
        return Err(AppError(BookingError::Validation(format!(
            "{start} is not a bookable start time on {}",
            request.date
        ))));
    }

    let booked: Vec<BookedInterval> = state
        .store
        .booked_intervals(provider.id, request.date, request.date)
        .await?
        .into_iter()
        .map(BookedInterval::from)
        .collect();
    if !generate_slots(schedule, service.duration, &booked)?.contains(&start) {
        return Err(slot_taken(&request, start));
    }

    // Only keep non-blank answers to fields shown for this service.
    let custom_fields = request
        .custom_fields
        .iter()
        .filter(|response| fields.iter().any(|field| field.id == response.field_id))
        .filter(|response| !response.value.trim().is_empty())
        .map(|response| (response.field_id, response.value.trim().to_string()))
        .collect();

    let appointment = NewAppointment {
        provider_id: provider.id,
        service_id: service.id,
        customer_name: request.customer_name.trim().to_string(),
        customer_email: request.customer_email.trim().to_string(),
        customer_phone: request.customer_phone.trim().to_string(),
        date: request.date,
        start,
        duration_minutes: service.duration,
        notes: request
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_string),
        custom_fields,
    };

    let created = match state.store.create_appointment(appointment).await? {
        BookingOutcome::Created(created) => created,
        BookingOutcome::SlotTaken => return Err(slot_taken(&request, start)),
    };

    info!(
        appointment_id = %created.id,
        provider_id = %provider.id,
        service_id = %service.id,
        date = %created.date,
        time = %start,
        "booking created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            id: created.id,
            provider_id: created.provider_id,
            service_id: created.service_id,
            date: created.date,
            time: start,
            status: created.status.parse()?,
            created_at: created.created_at,
        }),
    ))
}

fn slot_taken(request: &CreateBookingRequest, start: TimeOfDay) -> AppError {
    AppError(BookingError::Conflict(format!(
        "{start} on {} is no longer available",
        request.date
    )))
}
