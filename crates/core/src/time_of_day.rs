//! Wall-clock times within a single day, stored as minutes since midnight.
//!
//! Business hours and appointment times are persisted as `"HH:MM"` strings.
//! `TimeOfDay` is the parsed form the availability engine computes with; it
//! renders back to the same zero-padded `"HH:MM"` shape.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{BookingError, BookingResult};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// `24:00`, only meaningful as the end of a window.
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    pub const fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if minute >= 60 {
            return None;
        }
        let total = hour * 60 + minute;
        if total > MINUTES_PER_DAY {
            return None;
        }
        Some(TimeOfDay(total))
    }

    pub const fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes > MINUTES_PER_DAY {
            None
        } else {
            Some(TimeOfDay(minutes))
        }
    }

    /// Parses `"H:MM"` or `"HH:MM"`. Minutes must be two digits; `24:00` is
    /// accepted as the end of the day.
    pub fn parse(input: &str) -> BookingResult<Self> {
        let malformed = || BookingError::MalformedTime(input.to_string());

        let (hours, minutes) = input.trim().split_once(':').ok_or_else(malformed)?;
        if hours.is_empty()
            || hours.len() > 2
            || minutes.len() != 2
            || !hours.bytes().all(|b| b.is_ascii_digit())
            || !minutes.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }

        let hour: u32 = hours.parse().map_err(|_| malformed())?;
        let minute: u32 = minutes.parse().map_err(|_| malformed())?;
        Self::from_hm(hour, minute).ok_or_else(malformed)
    }

    pub const fn minutes(self) -> u32 {
        self.0
    }

    pub const fn hour(self) -> u32 {
        self.0 / 60
    }

    pub const fn minute(self) -> u32 {
        self.0 % 60
    }

    /// Adds `minutes`, returning `None` past `24:00`.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<Self> {
        self.0.checked_add(minutes).and_then(Self::from_minutes)
    }

    pub fn minutes_until(self, later: TimeOfDay) -> u32 {
        later.0.saturating_sub(self.0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeOfDay::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TimeOfDay::parse(&raw).map_err(serde::de::Error::custom)
    }
}
