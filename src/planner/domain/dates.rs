//! Calendar date, start time, and week window types.
//!
//! Due dates are plain calendar dates normalised to `YYYY-MM-DD` with no
//! embedded time and no time-zone conversion; comparisons are performed on
//! the calendar value alone.

use super::PlannerDomainError;
use chrono::{Days, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format string for due dates.
const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format string for start times.
const START_TIME_FORMAT: &str = "%H:%M";

/// Calendar due date of a scheduled task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DueDate(NaiveDate);

impl DueDate {
    /// Parses a `YYYY-MM-DD` value.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerDomainError::InvalidDueDate`] when the value does
    /// not parse as a calendar date.
    pub fn parse(value: &str) -> Result<Self, PlannerDomainError> {
        NaiveDate::parse_from_str(value.trim(), DUE_DATE_FORMAT)
            .map(Self)
            .map_err(|_| PlannerDomainError::InvalidDueDate(value.to_owned()))
    }

    /// Creates a due date from a calendar date.
    #[must_use]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the wrapped calendar date.
    #[must_use]
    pub const fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DUE_DATE_FORMAT))
    }
}

/// Daily timeline placement of a time-blocked task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StartTime(NaiveTime);

impl StartTime {
    /// Parses an `HH:MM` value.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerDomainError::InvalidStartTime`] when the value does
    /// not parse as a time of day.
    pub fn parse(value: &str) -> Result<Self, PlannerDomainError> {
        NaiveTime::parse_from_str(value.trim(), START_TIME_FORMAT)
            .map(Self)
            .map_err(|_| PlannerDomainError::InvalidStartTime(value.to_owned()))
    }

    /// Creates a start time from a time of day.
    #[must_use]
    pub const fn from_naive(time: NaiveTime) -> Self {
        Self(time)
    }

    /// Returns the wrapped time of day.
    #[must_use]
    pub const fn as_naive(self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(START_TIME_FORMAT))
    }
}

/// ISO Monday-to-Sunday week containing a target date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekWindow {
    monday: NaiveDate,
}

impl WeekWindow {
    /// Number of days in the window.
    pub const DAY_COUNT: u8 = 7;

    /// Returns the week containing the given date.
    #[must_use]
    pub fn containing(date: DueDate) -> Self {
        Self {
            monday: date.as_naive().week(Weekday::Mon).first_day(),
        }
    }

    /// Returns the Monday opening the week.
    #[must_use]
    pub const fn first_day(&self) -> DueDate {
        DueDate::from_naive(self.monday)
    }

    /// Returns the Sunday closing the week.
    #[must_use]
    pub fn last_day(&self) -> DueDate {
        self.date_at_offset(Self::DAY_COUNT - 1)
    }

    /// Returns the date at a Monday-based offset, clamped to the week.
    ///
    /// Offset 0 is Monday and offset 6 is Sunday.
    #[must_use]
    pub fn date_at_offset(&self, offset: u8) -> DueDate {
        let clamped = offset.min(Self::DAY_COUNT - 1);
        let date = self
            .monday
            .checked_add_days(Days::new(u64::from(clamped)))
            .unwrap_or(self.monday);
        DueDate::from_naive(date)
    }

    /// Returns whether the date falls inside the week.
    #[must_use]
    pub fn contains(&self, date: DueDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }
}
