use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A single failed check on a submitted booking form.
///
/// `field_id` is `None` for the fixed booking fields (name, email, phone,
/// time) and carries the definition id for provider-defined custom fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field_id: Option<Uuid>,
    pub label: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field_id: Option<Uuid>, label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_id,
            label: label.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid service duration: {0} minutes")]
    InvalidDuration(i32),

    #[error("Malformed time string: {0:?}")]
    MalformedTime(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    ValidationFailed(Vec<FieldError>),

    #[error("Booking conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type BookingResult<T> = Result<T, BookingError>;
