use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{errors::BookingResult, time_of_day::TimeOfDay};

/// Opening hours for one weekday. `day_of_week` counts from Sunday (0) to
/// Saturday (6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day_of_week: u8,
    pub is_available: bool,
    pub start_time: String,
    pub end_time: String,
}

impl DaySchedule {
    pub fn open(day_of_week: u8, start_time: &str, end_time: &str) -> Self {
        Self {
            day_of_week,
            is_available: true,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }

    pub fn closed(day_of_week: u8) -> Self {
        Self {
            day_of_week,
            is_available: false,
            start_time: "00:00".to_string(),
            end_time: "00:00".to_string(),
        }
    }

    /// Parsed `[start, end]` window.
    pub fn window(&self) -> BookingResult<(TimeOfDay, TimeOfDay)> {
        Ok((
            TimeOfDay::parse(&self.start_time)?,
            TimeOfDay::parse(&self.end_time)?,
        ))
    }
}

/// A provider's week, at most one schedule per weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyHours {
    days: [Option<DaySchedule>; 7],
}

impl WeeklyHours {
    pub fn from_schedules(schedules: impl IntoIterator<Item = DaySchedule>) -> Self {
        let mut hours = WeeklyHours::default();
        for schedule in schedules {
            let index = usize::from(schedule.day_of_week);
            match hours.days.get_mut(index) {
                Some(entry) if entry.is_none() => *entry = Some(schedule),
                Some(_) => warn!(
                    day_of_week = schedule.day_of_week,
                    "ignoring duplicate business hours for weekday"
                ),
                None => warn!(
                    day_of_week = schedule.day_of_week,
                    "ignoring business hours with out-of-range weekday"
                ),
            }
        }
        hours
    }

    pub fn for_weekday(&self, weekday: Weekday) -> Option<&DaySchedule> {
        self.days[weekday.num_days_from_sunday() as usize].as_ref()
    }

    pub fn for_date(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.for_weekday(date.weekday())
    }
}
