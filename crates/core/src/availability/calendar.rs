use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    availability::classify::{DayAvailability, DayClassifier},
    errors::BookingResult,
    models::{
        appointment::BookedInterval,
        business_hours::{DaySchedule, WeeklyHours},
    },
};

/// How far ahead customers may book.
pub const DEFAULT_BOOKING_HORIZON_DAYS: u32 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub availability: DayAvailability,
    /// False when the date is closed, already past, or beyond the horizon.
    pub bookable: bool,
}

/// Last date a customer may pick, or `None` if it overflows the calendar.
pub fn horizon_end(today: NaiveDate, horizon_days: u32) -> Option<NaiveDate> {
    today.checked_add_days(Days::new(u64::from(horizon_days)))
}

pub fn is_bookable_date(
    date: NaiveDate,
    schedule: Option<&DaySchedule>,
    today: NaiveDate,
    horizon_days: u32,
) -> bool {
    let within_horizon = horizon_end(today, horizon_days).is_none_or(|last| date <= last);
    date >= today && within_horizon && schedule.is_some_and(|s| s.is_available)
}

/// A provider's week viewed from a fixed "today".
#[derive(Debug, Clone)]
pub struct BookingCalendar<'a> {
    hours: &'a WeeklyHours,
    classifier: DayClassifier,
    today: NaiveDate,
    horizon_days: u32,
}

impl<'a> BookingCalendar<'a> {
    pub fn new(hours: &'a WeeklyHours, today: NaiveDate) -> Self {
        Self {
            hours,
            classifier: DayClassifier::default(),
            today,
            horizon_days: DEFAULT_BOOKING_HORIZON_DAYS,
        }
    }

    pub fn with_classifier(mut self, classifier: DayClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_horizon(mut self, horizon_days: u32) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn is_bookable(&self, date: NaiveDate) -> bool {
        is_bookable_date(date, self.hours.for_date(date), self.today, self.horizon_days)
    }

    pub fn day(
        &self,
        date: NaiveDate,
        duration_minutes: i32,
        booked: &[BookedInterval],
    ) -> BookingResult<CalendarDay> {
        let schedule = self.hours.for_date(date);
        let availability =
            self.classifier
                .classify(date, schedule, duration_minutes, booked, self.today)?;
        Ok(CalendarDay {
            date,
            availability,
            bookable: is_bookable_date(date, schedule, self.today, self.horizon_days),
        })
    }

    /// `count` consecutive days from `start`. Dates missing from
    /// `booked_by_date` have no bookings.
    pub fn days(
        &self,
        start: NaiveDate,
        count: usize,
        duration_minutes: i32,
        booked_by_date: &HashMap<NaiveDate, Vec<BookedInterval>>,
    ) -> BookingResult<Vec<CalendarDay>> {
        start
            .iter_days()
            .take(count)
            .map(|date| {
                let booked = booked_by_date.get(&date).map(Vec::as_slice).unwrap_or_default();
                self.day(date, duration_minutes, booked)
            })
            .collect()
    }
}
