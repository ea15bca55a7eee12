pub mod appointment;
pub mod availability;
pub mod business_hours;
pub mod form_field;
pub mod provider;
