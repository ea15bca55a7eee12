//! # Error Handling Middleware
//!
//! This module maps domain errors to HTTP status codes and JSON error bodies,
//! so every handler reports failures the same way.
//!
//! Every error body carries an `error` message. Per-field validation failures
//! additionally carry a `fields` array with one entry per offending field.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use slotbook_core::errors::BookingError;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `BookingError` and implements `IntoResponse` so handlers
/// can return `Result<Json<T>, AppError>` and use `?` on core and database
/// results alike.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use slotbook_api::middleware::error_handling::AppError;
/// use slotbook_core::errors::BookingError;
///
/// async fn handler(found: Option<u32>) -> Result<Json<u32>, AppError> {
///     let value = found.ok_or_else(|| BookingError::NotFound("Provider not found".into()))?;
///     Ok(Json(value))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_)
            | BookingError::InvalidDuration(_)
            | BookingError::MalformedTime(_) => StatusCode::BAD_REQUEST,
            BookingError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::Database(_) | BookingError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = ?self.0, "request failed");
        }

        let message = self.0.to_string();
        let body = match self.0 {
            BookingError::ValidationFailed(fields) => json!({ "error": message, "fields": fields }),
            _ => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

/// Allows `?` on `BookingResult` inside handlers.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Allows `?` on repository results; wraps the report as a database error.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}

/// Maps a BookingError straight to an HTTP response.
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}
