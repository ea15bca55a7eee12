use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    availability::slots::{generate_slots, positive_duration},
    errors::{BookingError, BookingResult},
    models::{appointment::BookedInterval, business_hours::DaySchedule},
    time_of_day::TimeOfDay,
};

/// Coarse hint used to tint calendar cells. The slot list stays authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayAvailability {
    Past,
    FullyBooked,
    MostlyAvailable,
    PartiallyBooked,
}

/// Share of the reference slots that must remain open for a day to count as
/// mostly available.
pub const MOSTLY_AVAILABLE_RATIO: f64 = 0.7;

/// The fixed window that sizes "total possible slots" when classifying a day.
///
/// It is independent of the provider's configured hours, so a
/// provider open 08:00-20:00 can have more open slots than the reference
/// total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceWindow {
    open: TimeOfDay,
    close: TimeOfDay,
}

impl ReferenceWindow {
    pub const DEFAULT: ReferenceWindow = ReferenceWindow {
        open: match TimeOfDay::from_hm(9, 0) {
            Some(time) => time,
            None => panic!("invalid reference open time"),
        },
        close: match TimeOfDay::from_hm(17, 0) {
            Some(time) => time,
            None => panic!("invalid reference close time"),
        },
    };

    pub fn new(open: TimeOfDay, close: TimeOfDay) -> BookingResult<Self> {
        if open >= close {
            return Err(BookingError::Validation(format!(
                "Reference window must open before it closes ({open} >= {close})"
            )));
        }
        Ok(Self { open, close })
    }

    pub fn open(&self) -> TimeOfDay {
        self.open
    }

    pub fn close(&self) -> TimeOfDay {
        self.close
    }

    /// `floor(window / duration)`.
    pub fn total_slots(&self, duration_minutes: u32) -> u32 {
        self.open.minutes_until(self.close) / duration_minutes
    }
}

impl Default for ReferenceWindow {
    fn default() -> Self {
        ReferenceWindow::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayClassifier {
    window: ReferenceWindow,
}

impl DayClassifier {
    pub fn new(window: ReferenceWindow) -> Self {
        Self { window }
    }

    pub fn window(&self) -> ReferenceWindow {
        self.window
    }

    pub fn classify(
        &self,
        date: NaiveDate,
        schedule: Option<&DaySchedule>,
        duration_minutes: i32,
        booked: &[BookedInterval],
        today: NaiveDate,
    ) -> BookingResult<DayAvailability> {
        if date < today {
            return Ok(DayAvailability::Past);
        }

        let slots = generate_slots(schedule, duration_minutes, booked)?;
        if slots.is_empty() {
            return Ok(DayAvailability::FullyBooked);
        }

        let total = self.window.total_slots(positive_duration(duration_minutes)?);
        let ratio = if total == 0 {
            1.0
        } else {
            slots.len() as f64 / f64::from(total)
        };

        if ratio > MOSTLY_AVAILABLE_RATIO {
            Ok(DayAvailability::MostlyAvailable)
        } else {
            Ok(DayAvailability::PartiallyBooked)
        }
    }
}

/// Classifies `date` against the default 09:00-17:00 reference window.
pub fn classify_day(
    date: NaiveDate,
    schedule: Option<&DaySchedule>,
    duration_minutes: i32,
    booked: &[BookedInterval],
    today: NaiveDate,
) -> BookingResult<DayAvailability> {
    DayClassifier::default().classify(date, schedule, duration_minutes, booked, today)
}
