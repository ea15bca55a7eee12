//! # Booking Form Validation
//!
//! Providers attach their own fields to the booking form. The checks for a
//! submission are assembled from those definitions at request time, and every
//! violation is reported at once so a client can mark each offending field.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;
use uuid::Uuid;

use crate::{
    errors::FieldError,
    models::{
        appointment::CreateBookingRequest,
        form_field::{FieldDefinition, FieldType},
    },
    time_of_day::TimeOfDay,
};

const MAX_EMAIL_LENGTH: usize = 254;
const MIN_PHONE_DIGITS: usize = 5;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ().-]+$").expect("valid phone regex"));

pub fn is_email(value: &str) -> bool {
    value.len() <= MAX_EMAIL_LENGTH && EMAIL_PATTERN.is_match(value)
}

pub fn is_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
        && value.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

/// Reads a checkbox-style flag.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Active fields shown for `service_id`, in display order.
pub fn fields_for_service(definitions: &[FieldDefinition], service_id: Uuid) -> Vec<FieldDefinition> {
    let mut fields: Vec<_> = definitions
        .iter()
        .filter(|field| field.applies_to(service_id))
        .cloned()
        .collect();
    fields.sort_by_key(|field| field.order);
    fields
}

fn check_field(field: &FieldDefinition, raw: Option<&str>) -> Option<FieldError> {
    let value = raw.map(str::trim).unwrap_or_default();
    let error = |message: String| Some(FieldError::new(Some(field.id), &field.label, message));

    if value.is_empty() {
        return if field.required {
            error(format!("{} is required", field.label))
        } else {
            None
        };
    }

    if let Err(message) = field.field_type.check_value(&field.label, value, field.options()) {
        return error(message);
    }

    if field.required && field.field_type == FieldType::Checkbox && parse_flag(value) == Some(false) {
        return error(format!("{} must be checked", field.label));
    }

    None
}

/// Validates submitted values against provider-defined fields.
///
/// Inactive definitions are ignored. Values for unknown field ids are not an
/// error.
pub fn validate_custom_fields(
    definitions: &[FieldDefinition],
    submitted: &HashMap<Uuid, String>,
) -> Result<(), Vec<FieldError>> {
    let errors: Vec<FieldError> = definitions
        .iter()
        .filter(|field| field.is_active)
        .filter_map(|field| check_field(field, submitted.get(&field.id).map(String::as_str)))
        .collect();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validates the fixed booking fields and then the custom fields. On success
/// returns the parsed appointment time.
pub fn validate_booking(
    request: &CreateBookingRequest,
    fields: &[FieldDefinition],
) -> Result<TimeOfDay, Vec<FieldError>> {
    let mut errors = Vec::new();

    if request.customer_name.trim().is_empty() {
        errors.push(FieldError::new(None, "Name", "Name is required"));
    }

    if !is_email(request.customer_email.trim()) {
        errors.push(FieldError::new(None, "Email", "Invalid email address"));
    }

    let phone = request.customer_phone.trim();
    if phone.is_empty() {
        errors.push(FieldError::new(None, "Phone", "Phone number is required"));
    } else if !is_phone(phone) {
        errors.push(FieldError::new(None, "Phone", "Phone must be a valid phone number"));
    }

    let time = match TimeOfDay::parse(&request.time) {
        Ok(time) => Some(time),
        Err(_) => {
            errors.push(FieldError::new(None, "Time", "Time must be in HH:MM format"));
            None
        }
    };

    let mut submitted: HashMap<Uuid, String> = HashMap::new();
    for response in &request.custom_fields {
        if submitted.insert(response.field_id, response.value.clone()).is_some() {
            let label = fields
                .iter()
                .find(|field| field.id == response.field_id)
                .map_or("Custom field", |field| field.label.as_str());
            errors.push(FieldError::new(
                Some(response.field_id),
                label,
                format!("{label} was answered more than once"),
            ));
        }
    }
    if let Err(field_errors) = validate_custom_fields(fields, &submitted) {
        errors.extend(field_errors);
    }

    match time {
        Some(time) if errors.is_empty() => Ok(time),
        _ => Err(errors),
    }
}
