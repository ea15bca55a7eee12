use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{availability::CalendarDay, time_of_day::TimeOfDay};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub duration: i32,
    pub slots: Vec<TimeOfDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub service_id: Uuid,
    pub today: NaiveDate,
    pub days: Vec<CalendarDay>,
}
