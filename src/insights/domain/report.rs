//! Productivity report types consumed by the reflection dashboard.

use crate::planner::domain::DueDate;
use serde::{Deserialize, Serialize};

/// Bucket label for tasks without a goal link.
pub const UNCATEGORIZED_GOAL: &str = "Uncategorized";

/// Number of goal groups surfaced to the dashboard.
pub const TOP_GOAL_SLICES: usize = 4;

/// Per-day activity bucket.
///
/// One bucket exists for every calendar day in the window, zero-filled
/// when no task lands on the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivity {
    /// Display label: weekday abbreviation for weeks, day number for
    /// months.
    pub label: String,
    /// The literal calendar date.
    pub date: DueDate,
    /// Tasks due on the day.
    pub total: u32,
    /// Completed tasks due on the day.
    pub completed: u32,
}

/// Per-goal activity group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSlice {
    /// Goal title, or [`UNCATEGORIZED_GOAL`] for goalless tasks.
    pub goal: String,
    /// Tasks in the group.
    pub total: u32,
    /// Completed tasks in the group.
    pub completed: u32,
}

/// Two-stage flow model: planned (goal-linked) versus ad-hoc work,
/// crossed with completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlowBreakdown {
    /// Goal-linked tasks that were completed.
    pub planned_completed: u32,
    /// Goal-linked tasks rolled over to the next period.
    pub planned_rolled: u32,
    /// Goalless tasks that were completed.
    pub adhoc_completed: u32,
    /// Goalless tasks rolled over to the next period.
    pub adhoc_rolled: u32,
}

impl FlowBreakdown {
    /// Returns the sum of the four flow counts, which equals the window
    /// total.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.planned_completed + self.planned_rolled + self.adhoc_completed + self.adhoc_rolled
    }
}

/// Coarse time-of-day classification of completion activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakTime {
    /// Most completions land between 05:00 and 11:59.
    Morning,
    /// Most completions land between 12:00 and 16:59.
    Afternoon,
    /// Most completions land between 17:00 and 21:59.
    Evening,
    /// Most completions land between 22:00 and 04:59.
    Night,
    /// No completion carries a timestamp.
    Unknown,
}

impl PeakTime {
    /// Returns the dashboard label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning worker",
            Self::Afternoon => "Afternoon worker",
            Self::Evening => "Evening worker",
            Self::Night => "Night owl",
            Self::Unknown => "No pattern yet",
        }
    }
}

/// Classification of estimate quality against recorded actual durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningAccuracy {
    /// Average deviation stays within the tolerance band.
    Calibrated,
    /// Work takes longer than estimated on average.
    Underestimator,
    /// Work finishes faster than estimated on average.
    Overestimator,
}

impl PlanningAccuracy {
    /// Returns the dashboard label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Calibrated => "Calibrated",
            Self::Underestimator => "Underestimator",
            Self::Overestimator => "Overestimator",
        }
    }
}

/// Scored report over a user's tasks in a window.
///
/// The report is a pure function of its input rows and window boundaries;
/// recomputing over unchanged input yields an identical value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityReport {
    /// Tasks in the window.
    pub total: u32,
    /// Completed tasks in the window.
    pub completed: u32,
    /// Completion score: `round(100 * completed / total)`, 0 for an empty
    /// window.
    pub score: u8,
    /// One bucket per calendar day in the window.
    pub activity_by_day: Vec<DayActivity>,
    /// Goal groups sorted descending by total, first-seen order on ties.
    pub goal_breakdown: Vec<GoalSlice>,
    /// Accumulated actual minutes across the window.
    pub focus_minutes: u32,
    /// Time-of-day completion classification.
    pub peak_time: PeakTime,
    /// Estimate-quality classification.
    pub planning_accuracy: PlanningAccuracy,
    /// Planned-versus-ad-hoc flow counts.
    pub flow: FlowBreakdown,
}

impl ProductivityReport {
    /// Returns focus time in hours, rounded to one decimal for display.
    #[must_use]
    pub fn focus_hours(&self) -> f64 {
        (f64::from(self.focus_minutes) / 60.0 * 10.0).round() / 10.0
    }

    /// Returns the day bucket with the most tasks, ties broken by day
    /// order.
    #[must_use]
    pub fn busiest_day(&self) -> Option<&DayActivity> {
        let mut busiest: Option<&DayActivity> = None;
        for bucket in &self.activity_by_day {
            if busiest.is_none_or(|current| bucket.total > current.total) {
                busiest = Some(bucket);
            }
        }
        busiest
    }

    /// Returns the goal groups surfaced to the dashboard: the first
    /// [`TOP_GOAL_SLICES`] of the full breakdown.
    #[must_use]
    pub fn top_goal_slices(&self) -> &[GoalSlice] {
        let surfaced = self.goal_breakdown.len().min(TOP_GOAL_SLICES);
        self.goal_breakdown.get(..surfaced).unwrap_or_default()
    }
}
