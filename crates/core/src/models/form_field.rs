use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::BookingError,
    validation::{is_email, is_phone, parse_flag},
};

/// The kinds of input a provider can add to their booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Email,
    Phone,
    TextArea,
    Select,
    Checkbox,
    Radio,
}

impl FieldType {
    pub const ALL: [FieldType; 8] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Email,
        FieldType::Phone,
        FieldType::TextArea,
        FieldType::Select,
        FieldType::Checkbox,
        FieldType::Radio,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::TextArea => "textarea",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
        }
    }

    /// The HTML control a client should render for this field.
    pub fn input_kind(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Phone => "tel",
            FieldType::TextArea => "textarea",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
        }
    }

    /// Select and radio fields are meaningless without options.
    pub fn requires_options(self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }

    /// Checks a trimmed, non-empty value. The error is a message ready to be
    /// shown next to the field.
    pub fn check_value(self, label: &str, value: &str, options: &[String]) -> Result<(), String> {
        let in_options = || options.iter().any(|option| option == value);
        match self {
            FieldType::Text | FieldType::TextArea => Ok(()),
            FieldType::Number => match value.parse::<f64>() {
                Ok(number) if number.is_finite() => Ok(()),
                _ => Err(format!("{label} must be a number")),
            },
            FieldType::Email => {
                if is_email(value) {
                    Ok(())
                } else {
                    Err("Invalid email address".to_string())
                }
            }
            FieldType::Phone => {
                if is_phone(value) {
                    Ok(())
                } else {
                    Err(format!("{label} must be a valid phone number"))
                }
            }
            FieldType::Select | FieldType::Radio => {
                if in_options() {
                    Ok(())
                } else {
                    Err(format!("{label} must be one of: {}", options.join(", ")))
                }
            }
            FieldType::Checkbox => {
                if in_options() || parse_flag(value).is_some() {
                    Ok(())
                } else {
                    Err(format!("{label} has an unrecognised value"))
                }
            }
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| BookingError::Validation(format!("Unknown field type: {s}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: Uuid,
    /// `None` applies the field to every service of the provider.
    pub service_id: Option<Uuid>,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub placeholder: Option<String>,
    pub options: Option<Vec<String>>,
    pub default_value: Option<String>,
    pub order: i32,
    pub is_active: bool,
}

impl FieldDefinition {
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }

    pub fn applies_to(&self, service_id: Uuid) -> bool {
        self.is_active && self.service_id.is_none_or(|scoped| scoped == service_id)
    }
}

/// Field description sent to booking clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: Uuid,
    pub label: String,
    pub field_type: FieldType,
    pub input_kind: String,
    pub required: bool,
    pub placeholder: Option<String>,
    pub options: Vec<String>,
    pub default_value: Option<String>,
}

impl From<&FieldDefinition> for FieldDescriptor {
    fn from(field: &FieldDefinition) -> Self {
        Self {
            id: field.id,
            label: field.label.clone(),
            field_type: field.field_type,
            input_kind: field.field_type.input_kind().to_string(),
            required: field.required,
            placeholder: field.placeholder.clone(),
            options: field.options().to_vec(),
            default_value: field.default_value.clone(),
        }
    }
}
