//! # Availability Engine
//!
//! Derives bookable time slots for a provider's day from three inputs: the
//! weekday's business hours, the service duration, and the intervals already
//! booked on that date.
//!
//! Everything here is a pure function of its arguments. Callers fetch the
//! inputs, call in, and render or persist the result; nothing is cached.
//!
//! - [`slots`]: the slot generator and the half-open overlap check
//! - [`classify`]: the coarse per-day hint used by calendar views
//! - [`calendar`]: bookable-date rules and multi-day views

pub mod calendar;
pub mod classify;
pub mod slots;

pub use calendar::{
    BookingCalendar, CalendarDay, DEFAULT_BOOKING_HORIZON_DAYS, horizon_end, is_bookable_date,
};
pub use classify::{DayAvailability, DayClassifier, ReferenceWindow, classify_day};
pub use slots::{generate_slots, is_slot_free, overlaps};
