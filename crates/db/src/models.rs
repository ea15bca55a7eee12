use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use slotbook_core::{
    errors::BookingError,
    models::{
        appointment::BookedInterval,
        business_hours::DaySchedule,
        form_field::{FieldDefinition, FieldType},
        provider::ServiceSummary,
    },
};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProvider {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub business_name: String,
    pub bio: Option<String>,
    pub contact_email: String,
    pub timezone: String,
    pub custom_url: String,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub name: String,
    pub description: String,
    pub duration: i32,
    pub price: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&DbService> for ServiceSummary {
    fn from(service: &DbService) -> Self {
        Self {
            id: service.id,
            name: service.name.clone(),
            description: service.description.clone(),
            duration: service.duration,
            price: service.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBusinessHours {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub day_of_week: i16,
    pub start_time: String,
    pub end_time: String,
    pub is_available: bool,
}

impl From<DbBusinessHours> for DaySchedule {
    fn from(row: DbBusinessHours) -> Self {
        Self {
            // Out-of-range weekdays are dropped later by `WeeklyHours`.
            day_of_week: u8::try_from(row.day_of_week).unwrap_or(u8::MAX),
            is_available: row.is_available,
            start_time: row.start_time,
            end_time: row.end_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub service_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// An appointment's date, start, and the duration of its service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DbBookedInterval {
    pub date: NaiveDate,
    pub time: String,
    pub duration: i32,
}

impl From<DbBookedInterval> for BookedInterval {
    fn from(row: DbBookedInterval) -> Self {
        BookedInterval::new(row.time, row.duration)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbFormField {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub service_id: Option<Uuid>,
    pub label: String,
    pub field_type: String,
    pub required: bool,
    pub placeholder: Option<String>,
    pub options: Option<Vec<String>>,
    pub default_value: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
}

impl TryFrom<DbFormField> for FieldDefinition {
    type Error = BookingError;

    fn try_from(row: DbFormField) -> Result<Self, Self::Error> {
        let field_type: FieldType = row.field_type.parse()?;
        let has_options = row.options.as_ref().is_some_and(|options| !options.is_empty());
        if field_type.requires_options() && !has_options {
            return Err(BookingError::Validation(format!(
                "{} field '{}' has no options",
                field_type, row.label
            )));
        }

        Ok(Self {
            id: row.id,
            service_id: row.service_id,
            label: row.label,
            field_type,
            required: row.required,
            placeholder: row.placeholder,
            options: row.options,
            default_value: row.default_value,
            order: row.display_order,
            is_active: row.is_active,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbFormResponse {
    pub appointment_id: Uuid,
    pub field_id: Uuid,
    pub value: String,
}
