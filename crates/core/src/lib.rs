//! # Slotbook Core
//!
//! Domain types and pure logic shared by the database and API crates:
//! the availability engine, booking form validation, wall-clock time
//! parsing, and the error taxonomy. Nothing in this crate performs I/O.

pub mod availability;
pub mod errors;
pub mod models;
pub mod time_of_day;
pub mod validation;
