use axum::http::StatusCode;
use chrono::{NaiveDate, Utc};
use fake::{
    Fake,
    faker::{internet::en::SafeEmail, name::en::Name},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use slotbook_core::models::{
    appointment::{AppointmentStatus, CreateBookingResponse},
    form_field::{FieldDescriptor, FieldType},
};
use slotbook_db::{BookingOutcome, models::DbAppointment};
use uuid::Uuid;

use crate::test_utils::{
    TestContext, booked, days_from_today, form_field, hours_every_day, today,
};

fn booking_body(date: NaiveDate, time: &str, custom_fields: Value) -> Value {
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    json!({
        "date": date,
        "time": time,
        "customer_name": name,
        "customer_email": email,
        "customer_phone": "+1 (555) 010-2030",
        "notes": "  ",
        "custom_fields": custom_fields,
    })
}

fn open_context() -> TestContext {
    let mut ctx = TestContext::new();
    ctx.expect_service();
    ctx.expect_hours(hours_every_day(ctx.provider.id, "09:00", "17:00"));
    ctx
}

#[test_log::test(tokio::test)]
async fn test_get_fields_for_service() {
    let mut ctx = TestContext::new();
    ctx.expect_service();
    let other_service = Uuid::new_v4();
    let mut inactive = form_field(None, "Referral code", "text", 0);
    inactive.is_active = false;
    ctx.expect_fields(vec![
        form_field(Some(ctx.service.id), "Injury area", "textarea", 2),
        form_field(None, "Contact phone", "phone", 1),
        form_field(Some(other_service), "Shoe size", "number", 0),
        inactive,
    ]);
    let path = ctx.service_path("fields");

    let server = ctx.server();
    let response = server.get(&path).await;

    response.assert_status_ok();
    let fields: Vec<FieldDescriptor> = response.json();
    let labels: Vec<&str> = fields.iter().map(|field| field.label.as_str()).collect();
    assert_eq!(labels, vec!["Contact phone", "Injury area"]);
    assert_eq!(fields[0].field_type, FieldType::Phone);
    assert_eq!(fields[0].input_kind, "tel");
}

#[test_log::test(tokio::test)]
async fn test_create_booking_success() {
    let mut ctx = open_context();
    let date = days_from_today(3);
    let mut consent = form_field(None, "Consent", "checkbox", 0);
    consent.required = true;
    let consent_id = consent.id;
    let other_service_field = form_field(Some(Uuid::new_v4()), "Shoe size", "number", 1);
    let other_id = other_service_field.id;
    ctx.expect_fields(vec![consent, other_service_field]);
    ctx.expect_booked(vec![booked(date, "09:00", 60)]);

    let provider_id = ctx.provider.id;
    let service_id = ctx.service.id;
    let appointment_id = Uuid::new_v4();
    ctx.store
        .expect_create_appointment()
        .withf(move |new| {
            new.date == date
                && new.start.to_string() == "10:00"
                && new.duration_minutes == 60
                && new.notes.is_none()
                && new.custom_fields == vec![(consent_id, "true".to_string())]
        })
        .times(1)
        .returning(move |new| {
            Ok(BookingOutcome::Created(DbAppointment {
                id: appointment_id,
                provider_id: new.provider_id,
                service_id: new.service_id,
                customer_name: new.customer_name,
                customer_email: new.customer_email,
                customer_phone: new.customer_phone,
                date: new.date,
                time: new.start.to_string(),
                notes: new.notes,
                status: "confirmed".to_string(),
                created_at: Utc::now(),
            }))
        });
    let path = ctx.service_path("bookings");

    let server = ctx.server();
    let body = booking_body(
        date,
        "10:00",
        json!([
            { "field_id": consent_id, "value": "true" },
            { "field_id": other_id, "value": "42" },
        ]),
    );
    let response = server.post(&path).json(&body).await;

    response.assert_status(StatusCode::CREATED);
    let created: CreateBookingResponse = response.json();
    assert_eq!(created.id, appointment_id);
    assert_eq!(created.provider_id, provider_id);
    assert_eq!(created.service_id, service_id);
    assert_eq!(created.date, date);
    assert_eq!(created.time.to_string(), "10:00");
    assert_eq!(created.status, AppointmentStatus::Confirmed);
}

#[test_log::test(tokio::test)]
async fn test_create_booking_reports_every_invalid_field() {
    let mut ctx = open_context();
    let mut email = form_field(None, "Work email", "email", 0);
    email.required = true;
    let email_id = email.id;
    let notes = form_field(None, "Anything else", "text", 1);
    let notes_id = notes.id;
    ctx.expect_fields(vec![email, notes]);
    ctx.store.expect_create_appointment().never();
    let path = ctx.service_path("bookings");

    let server = ctx.server();
    let mut body = booking_body(
        days_from_today(1),
        "10:00",
        json!([
            { "field_id": email_id, "value": "not-an-email" },
            { "field_id": notes_id, "value": "Prefers mornings" },
        ]),
    );
    body["customer_name"] = json!("   ");
    let response = server.post(&path).json(&body).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "Validation failed for 2 field(s)");
    let labels: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|field| field["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Name", "Work email"]);
    assert_eq!(body["fields"][1]["field_id"], json!(email_id));
    assert_eq!(body["fields"][1]["message"], "Invalid email address");
}

#[test_log::test(tokio::test)]
async fn test_create_booking_rejects_repeated_answers() {
    let mut ctx = open_context();
    let mut age = form_field(None, "Age", "number", 0);
    age.required = true;
    let age_id = age.id;
    ctx.expect_fields(vec![age]);
    ctx.store.expect_create_appointment().never();
    let path = ctx.service_path("bookings");

    let server = ctx.server();
    let body = booking_body(
        days_from_today(1),
        "10:00",
        json!([
            { "field_id": age_id, "value": "not a number" },
            { "field_id": age_id, "value": "42" },
        ]),
    );
    let response = server.post(&path).json(&body).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["fields"][0]["field_id"], json!(age_id));
    assert_eq!(body["fields"][0]["label"], "Age");
    assert_eq!(body["fields"][0]["message"], "Age was answered more than once");
}

#[test_log::test(tokio::test)]
async fn test_create_booking_off_grid_time_is_bad_request() {
    let mut ctx = open_context();
    ctx.expect_fields(Vec::new());
    ctx.store.expect_create_appointment().never();
    let path = ctx.service_path("bookings");

    let server = ctx.server();
    let body = booking_body(days_from_today(1), "09:10", json!([]));
    let response = server.post(&path).json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_create_booking_in_the_past_is_bad_request() {
    let mut ctx = open_context();
    ctx.expect_fields(Vec::new());
    ctx.store.expect_create_appointment().never();
    let path = ctx.service_path("bookings");

    let server = ctx.server();
    let body = booking_body(today().pred_opt().unwrap(), "10:00", json!([]));
    let response = server.post(&path).json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_create_booking_overlapping_slot_conflicts() {
    let mut ctx = open_context();
    let date = days_from_today(1);
    ctx.expect_fields(Vec::new());
    // A 90 minute appointment from 09:30 covers the 10:00 slot.
    ctx.expect_booked(vec![booked(date, "09:30", 90)]);
    ctx.store.expect_create_appointment().never();
    let path = ctx.service_path("bookings");

    let server = ctx.server();
    let body = booking_body(date, "10:00", json!([]));
    let response = server.post(&path).json(&body).await;

    response.assert_status(StatusCode::CONFLICT);
}

#[test_log::test(tokio::test)]
async fn test_create_booking_lost_race_conflicts() {
    let mut ctx = open_context();
    ctx.expect_fields(Vec::new());
    ctx.expect_booked(Vec::new());
    ctx.store
        .expect_create_appointment()
        .times(1)
        .returning(|_| Ok(BookingOutcome::SlotTaken));
    let path = ctx.service_path("bookings");

    let server = ctx.server();
    let body = booking_body(days_from_today(1), "14:00", json!([]));
    let response = server.post(&path).json(&body).await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Booking conflict: 14:00 on"));
}

#[test_log::test(tokio::test)]
async fn test_create_booking_database_failure_is_internal_error() {
    let mut ctx = open_context();
    ctx.expect_fields(Vec::new());
    ctx.expect_booked(Vec::new());
    ctx.store
        .expect_create_appointment()
        .returning(|_| Err(eyre::eyre!("connection reset")));
    let path = ctx.service_path("bookings");

    let server = ctx.server();
    let body = booking_body(days_from_today(1), "14:00", json!([]));
    let response = server.post(&path).json(&body).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}
