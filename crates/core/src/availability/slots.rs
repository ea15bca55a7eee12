use tracing::warn;

use crate::{
    errors::{BookingError, BookingResult},
    models::{appointment::BookedInterval, business_hours::DaySchedule},
    time_of_day::TimeOfDay,
};

/// Half-open interval overlap: `[a_start, a_end)` against `[b_start, b_end)`.
pub fn overlaps(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start < b_end && b_start < a_end
}

pub(crate) fn positive_duration(duration_minutes: i32) -> BookingResult<u32> {
    u32::try_from(duration_minutes)
        .ok()
        .filter(|minutes| *minutes > 0)
        .ok_or(BookingError::InvalidDuration(duration_minutes))
}

/// Booked intervals in minutes since midnight. Records with an unparsable
/// time or a non-positive duration are dropped.
fn busy_minutes(booked: &[BookedInterval]) -> Vec<(u32, u32)> {
    booked
        .iter()
        .filter_map(|interval| {
            let start = match TimeOfDay::parse(&interval.time) {
                Ok(start) => start.minutes(),
                Err(err) => {
                    warn!(%err, "skipping booked interval with malformed time");
                    return None;
                }
            };
            match positive_duration(interval.duration_minutes) {
                Ok(minutes) => Some((start, start + minutes)),
                Err(err) => {
                    warn!(%err, time = %interval.time, "skipping booked interval");
                    None
                }
            }
        })
        .collect()
}

fn is_free(start: u32, end: u32, busy: &[(u32, u32)]) -> bool {
    !busy
        .iter()
        .any(|&(busy_start, busy_end)| overlaps(start, end, busy_start, busy_end))
}

/// Bookable start times for one day.
///
/// Candidates start at the opening time and advance by the service duration;
/// a candidate is kept when it ends no later than closing time and does not
/// overlap any booked interval. A missing or closed schedule yields no slots.
///
/// # Errors
///
/// * `BookingError::InvalidDuration` - `duration_minutes` is zero or negative
///   and the day is open
pub fn generate_slots(
    schedule: Option<&DaySchedule>,
    duration_minutes: i32,
    booked: &[BookedInterval],
) -> BookingResult<Vec<TimeOfDay>> {
    let Some(schedule) = schedule.filter(|schedule| schedule.is_available) else {
        return Ok(Vec::new());
    };
    let step = positive_duration(duration_minutes)?;

    let (open, close) = match schedule.window() {
        Ok(window) => window,
        Err(err) => {
            warn!(%err, day_of_week = schedule.day_of_week, "treating day with malformed hours as closed");
            return Ok(Vec::new());
        }
    };

    let busy = busy_minutes(booked);
    let mut slots = Vec::new();
    let mut cursor = open;
    while let Some(end) = cursor.checked_add_minutes(step) {
        if end > close {
            break;
        }
        if is_free(cursor.minutes(), end.minutes(), &busy) {
            slots.push(cursor);
        }
        cursor = end;
    }

    Ok(slots)
}

/// Whether `[start, start + duration_minutes)` avoids every booked interval.
pub fn is_slot_free(
    start: TimeOfDay,
    duration_minutes: i32,
    booked: &[BookedInterval],
) -> BookingResult<bool> {
    let minutes = positive_duration(duration_minutes)?;
    let begin = start.minutes();
    Ok(is_free(begin, begin + minutes, &busy_minutes(booked)))
}
