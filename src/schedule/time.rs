//! Wall-clock and weekday utilities for the weekly grid

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowercase day names, Monday first. Index equals the grid column.
pub const DAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const MINUTES_PER_DAY: i64 = 24 * 60;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Meridiem {
    Am,
    Pm,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::Am => f.write_str("AM"),
            Meridiem::Pm => f.write_str("PM"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("empty time string")]
    Empty,
    #[error("missing am/pm suffix in `{0}`")]
    MissingMeridiem(String),
    #[error("invalid number in `{0}`")]
    InvalidNumber(String),
    #[error("time out of range: hour {hour}, minute {minute}")]
    OutOfRange { hour: u8, minute: u8 },
}

/// Convert a 12-hour clock hour to 24-hour form. 12 AM is 0, 12 PM stays 12.
pub fn to_24_hour(hour12: u8, meridiem: Meridiem) -> u8 {
    let base = hour12 % 12;
    match meridiem {
        Meridiem::Am => base,
        Meridiem::Pm => base + 12,
    }
}

/// Convert a 24-hour clock hour to its 12-hour display hour and meridiem.
pub fn to_12_hour(hour24: u8) -> (u8, Meridiem) {
    match hour24 % 24 {
        0 => (12, Meridiem::Am),
        h @ 1..=11 => (h, Meridiem::Am),
        12 => (12, Meridiem::Pm),
        h => (h - 12, Meridiem::Pm),
    }
}

/// Display label for a whole hour, e.g. `"2:00 PM"`.
pub fn hour_label(hour24: u8) -> String {
    let (hour, meridiem) = to_12_hour(hour24);
    format!("{}:00 {}", hour, meridiem)
}

/// A time of day within a single day, displayed as `H:MM AM|PM`.
///
/// Arithmetic wraps at midnight; there is no day rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub fn new(hour24: u8, minute: u8) -> Option<Self> {
        NaiveTime::from_hms_opt(hour24 as u32, minute as u32, 0).map(ClockTime)
    }

    /// Build from a 12-hour clock reading. Hour must be 1–12.
    pub fn from_12_hour(hour12: u8, minute: u8, meridiem: Meridiem) -> Option<Self> {
        if !(1..=12).contains(&hour12) {
            return None;
        }
        Self::new(to_24_hour(hour12, meridiem), minute)
    }

    pub fn hour24(&self) -> u8 {
        self.0.hour() as u8
    }

    pub fn minute(&self) -> u8 {
        self.0.minute() as u8
    }

    pub fn meridiem(&self) -> Meridiem {
        to_12_hour(self.hour24()).1
    }

    pub fn add_hours(self, hours: i64) -> Self {
        self.add_minutes(hours.rem_euclid(24) * 60)
    }

    /// Whole days drop out before the addition, so any `i64` is accepted.
    pub fn add_minutes(self, minutes: i64) -> Self {
        let minutes = minutes.rem_euclid(MINUTES_PER_DAY);
        let (time, _overflow_secs) = self.0.overflowing_add_signed(Duration::minutes(minutes));
        ClockTime(time)
    }

    /// The first whole hour strictly after `now` (23:10 gives 12:00 AM).
    pub fn next_full_hour(now: NaiveTime) -> Self {
        let hour = (now.hour() + 1) % 24;
        ClockTime(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default())
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, meridiem) = to_12_hour(self.hour24());
        write!(f, "{}:{:02} {}", hour, self.minute(), meridiem)
    }
}

impl FromStr for ClockTime {
    type Err = TimeParseError;

    /// Accepts "3pm", "3:30 p.m.", "11:00 AM"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase().replace('.', "");
        if lowered.is_empty() {
            return Err(TimeParseError::Empty);
        }

        let (time_part, meridiem) = if let Some(rest) = lowered.strip_suffix("pm") {
            (rest, Meridiem::Pm)
        } else if let Some(rest) = lowered.strip_suffix("am") {
            (rest, Meridiem::Am)
        } else {
            return Err(TimeParseError::MissingMeridiem(s.to_string()));
        };

        let time_part = time_part.trim();
        let invalid = || TimeParseError::InvalidNumber(s.to_string());
        let (hour, minute) = match time_part.split_once(':') {
            Some((h, m)) => (
                h.trim().parse::<u8>().map_err(|_| invalid())?,
                m.trim().parse::<u8>().map_err(|_| invalid())?,
            ),
            None => (time_part.parse::<u8>().map_err(|_| invalid())?, 0),
        };

        ClockTime::from_12_hour(hour, minute, meridiem)
            .ok_or(TimeParseError::OutOfRange { hour, minute })
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Weekday for a Monday-based index (0 = Monday).
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    WEEKDAYS.get(index as usize).copied()
}

pub fn day_index(day: Weekday) -> u8 {
    day.num_days_from_monday() as u8
}

/// Convert a Sunday-based day number (0 = Sunday) to this grid's
/// Monday-based index.
pub fn monday_index(native_sunday0: u8) -> u8 {
    if native_sunday0 == 0 {
        6
    } else {
        native_sunday0 - 1
    }
}

pub fn today_index(now: NaiveDateTime) -> u8 {
    monday_index(now.weekday().num_days_from_sunday() as u8)
}

pub fn tomorrow_index(now: NaiveDateTime) -> u8 {
    (today_index(now) + 1) % 7
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday();
    date - Duration::days(days_from_monday as i64)
}

/// Monday through Sunday of the week containing `anchor`
pub fn week_dates(anchor: NaiveDate) -> [NaiveDate; 7] {
    let start = week_start(anchor);
    let mut dates = [start; 7];
    for (offset, date) in dates.iter_mut().enumerate() {
        *date = start + Duration::days(offset as i64);
    }
    dates
}

pub fn shift_week(anchor: NaiveDate, weeks: i64) -> NaiveDate {
    anchor + Duration::weeks(weeks)
}

pub fn current_day_column(week: &[NaiveDate; 7], today: NaiveDate) -> Option<usize> {
    week.iter().position(|date| *date == today)
}

/// Serde adapter storing a `Weekday` as its Monday-based index.
pub mod day_index_serde {
    use chrono::Weekday;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(super::day_index(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let index = u8::deserialize(deserializer)?;
        super::weekday_from_index(index)
            .ok_or_else(|| D::Error::custom(format!("day index {} out of range 0-6", index)))
    }
}
