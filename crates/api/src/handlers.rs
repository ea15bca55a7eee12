/// Slot lists and day classification
pub mod availability;
/// Booking form fields and booking creation
pub mod booking;
/// Public provider profile and shared provider lookups
pub mod provider;
