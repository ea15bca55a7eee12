pub mod appointment;
pub mod business_hours;
pub mod form_field;
pub mod provider;
pub mod service;
