//! Report window selection.

use crate::planner::domain::{DueDate, WeekWindow};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Kind of window the report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// Seven days anchored on Monday.
    Week,
    /// A calendar month.
    Month,
}

/// Inclusive date range a report is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportWindow {
    kind: WindowKind,
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportWindow {
    /// Returns the Monday-to-Sunday week containing the anchor date.
    #[must_use]
    pub fn week_containing(anchor: DueDate) -> Self {
        let week = WeekWindow::containing(anchor);
        Self {
            kind: WindowKind::Week,
            start: week.first_day().as_naive(),
            end: week.last_day().as_naive(),
        }
    }

    /// Returns the calendar month containing the anchor date.
    #[must_use]
    pub fn month_containing(anchor: DueDate) -> Self {
        let date = anchor.as_naive();
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next_month| next_month.checked_sub_days(Days::new(1)))
            .unwrap_or(start);
        Self {
            kind: WindowKind::Month,
            start,
            end,
        }
    }

    /// Returns the window containing the anchor date for the given kind.
    #[must_use]
    pub fn containing(kind: WindowKind, anchor: DueDate) -> Self {
        match kind {
            WindowKind::Week => Self::week_containing(anchor),
            WindowKind::Month => Self::month_containing(anchor),
        }
    }

    /// Returns the window kind.
    #[must_use]
    pub const fn kind(&self) -> WindowKind {
        self.kind
    }

    /// Returns the first day of the window.
    #[must_use]
    pub const fn first_day(&self) -> DueDate {
        DueDate::from_naive(self.start)
    }

    /// Returns the last day of the window.
    #[must_use]
    pub const fn last_day(&self) -> DueDate {
        DueDate::from_naive(self.end)
    }

    /// Iterates every calendar day in the window.
    #[must_use]
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Returns whether the date falls inside the window.
    #[must_use]
    pub fn contains(&self, date: DueDate) -> bool {
        let naive = date.as_naive();
        naive >= self.start && naive <= self.end
    }

    /// Returns the display label for a day bucket: the weekday
    /// abbreviation for week windows, the day number for month windows.
    #[must_use]
    pub fn day_label(&self, date: NaiveDate) -> String {
        match self.kind {
            WindowKind::Week => date.format("%a").to_string(),
            WindowKind::Month => date.day().to_string(),
        }
    }
}
