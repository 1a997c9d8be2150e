//! Search filter form
//!
//! Subject, week day, and time of day sent to the classes endpoint.

use crate::config::filters::{DEFAULT_SUBJECT, DEFAULT_WEEK_DAY, TIME_FORMAT};
use crate::error::{ProffyError, Result};
use chrono::{Local, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// WeekDay
// =============================================================================

/// Day of the week as numbered by the backend (1 = Sunday .. 7 = Saturday)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WeekDay {
    Sunday = 1,
    Monday = 2,
    Tuesday = 3,
    Wednesday = 4,
    Thursday = 5,
    Friday = 6,
    Saturday = 7,
}

impl WeekDay {
    /// All days in picker order
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Sunday,
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
    ];

    /// Numeric value sent as `week_day`
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Label shown in the week-day picker
    pub fn label(self) -> &'static str {
        match self {
            WeekDay::Sunday => "Domingo",
            WeekDay::Monday => "Segunda-Feira",
            WeekDay::Tuesday => "Terça-Feira",
            WeekDay::Wednesday => "Quarta-Feira",
            WeekDay::Thursday => "Quinta-Feira",
            WeekDay::Friday => "Sexta-Feira",
            WeekDay::Saturday => "Sábado",
        }
    }

    /// Next day, wrapping Saturday back to Sunday
    pub fn next(self) -> Self {
        Self::ALL[self.number() as usize % 7]
    }

    /// Previous day, wrapping Sunday back to Saturday
    pub fn previous(self) -> Self {
        Self::ALL[(self.number() as usize + 5) % 7]
    }
}

impl Default for WeekDay {
    fn default() -> Self {
        WeekDay::try_from(DEFAULT_WEEK_DAY).unwrap_or(WeekDay::Sunday)
    }
}

impl TryFrom<u8> for WeekDay {
    type Error = ProffyError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1..=7 => Ok(Self::ALL[value as usize - 1]),
            other => Err(ProffyError::InvalidWeekDay(other)),
        }
    }
}

impl From<WeekDay> for u8 {
    fn from(day: WeekDay) -> Self {
        day.number()
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Time helpers
// =============================================================================

/// Format a time of day as zero-padded 24-hour `HH:mm`
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Parse `HH:mm` (24-hour)
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), TIME_FORMAT)
        .map_err(|_| ProffyError::InvalidTime(s.to_string()))
}

fn now_to_the_minute() -> NaiveTime {
    let now = Local::now().time();
    NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now)
}

// =============================================================================
// FilterCriteria
// =============================================================================

/// Current state of the search form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub subject: String,
    pub week_day: WeekDay,
    pub time: NaiveTime,
}

impl Default for FilterCriteria {
    /// Default subject and week day, current local time
    fn default() -> Self {
        Self {
            subject: DEFAULT_SUBJECT.to_string(),
            week_day: WeekDay::default(),
            time: now_to_the_minute(),
        }
    }
}

impl FilterCriteria {
    pub fn new(subject: impl Into<String>, week_day: WeekDay, time: NaiveTime) -> Self {
        Self {
            subject: subject.into(),
            week_day,
            time,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_week_day(mut self, week_day: WeekDay) -> Self {
        self.week_day = week_day;
        self
    }

    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.time = time;
        self
    }

    /// Time as sent to the API and shown in the form
    pub fn formatted_time(&self) -> String {
        format_time(self.time)
    }

    /// Query parameters for `GET classes`
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("subject", self.subject.clone()),
            ("week_day", self.week_day.number().to_string()),
            ("time", self.formatted_time()),
        ]
    }
}
