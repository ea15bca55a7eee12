use axum::{body::to_bytes, http::StatusCode, response::Response};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use slotbook_api::middleware::error_handling::{AppError, map_error};
use slotbook_core::errors::{BookingError, FieldError};
use uuid::Uuid;

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[rstest]
#[case(BookingError::NotFound("Provider not found".into()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("Invalid input".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::InvalidDuration(0), StatusCode::BAD_REQUEST)]
#[case(BookingError::MalformedTime("9am".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::ValidationFailed(Vec::new()), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(BookingError::Conflict("10:00 taken".into()), StatusCode::CONFLICT)]
#[case(BookingError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    BookingError::Internal(Box::new(std::io::Error::other("Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    assert_eq!(map_error(error).status(), expected);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response = map_error(BookingError::Conflict("10:00 on 2025-03-10 is no longer available".into()));

    let body = json_body(response).await;
    assert_eq!(
        body,
        serde_json::json!({ "error": "Booking conflict: 10:00 on 2025-03-10 is no longer available" })
    );
}

#[tokio::test]
async fn test_validation_failure_lists_fields() {
    let field_id = Uuid::new_v4();
    let error = BookingError::ValidationFailed(vec![
        FieldError::new(None, "Name", "Name is required"),
        FieldError::new(Some(field_id), "Work email", "Invalid email address"),
    ]);

    let body = json_body(map_error(error)).await;
    assert_eq!(body["error"], "Validation failed for 2 field(s)");
    assert_eq!(body["fields"][0]["field_id"], Value::Null);
    assert_eq!(body["fields"][1]["field_id"], field_id.to_string());
    assert_eq!(body["fields"][1]["label"], "Work email");
}

#[test]
fn test_eyre_reports_become_database_errors() {
    let error = AppError::from(eyre::eyre!("pool timed out"));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(matches!(error.0, BookingError::Database(_)));
}
