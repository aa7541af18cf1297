//! Reduction of window tasks into a productivity report.
//!
//! Aggregation is a pure function: callers fetch the user's tasks whose
//! due date falls in the window (joined with goal titles) and receive the
//! complete report. An empty window yields zeroed counts and neutral
//! classifications rather than an error.

use super::{
    DayActivity, FlowBreakdown, GoalSlice, PeakTime, PlanningAccuracy, ProductivityReport,
    ReportWindow, UNCATEGORIZED_GOAL,
};
use crate::planner::domain::DueDate;
use chrono::{DateTime, NaiveDate, Timelike, Utc};
use std::collections::HashMap;

/// Average deviation, in minutes, still considered calibrated.
const PLANNING_TOLERANCE_MINUTES: i64 = 10;

/// Flat task record the aggregator consumes.
///
/// Rows are pre-filtered to the window and joined with goal titles by the
/// caller; the aggregator never touches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowTask {
    /// Due date inside the window.
    pub due_date: DueDate,
    /// Completion flag.
    pub completed: bool,
    /// Completion timestamp, when completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Title of the linked goal, if any.
    pub goal_title: Option<String>,
    /// Estimated minutes.
    pub estimated_minutes: u32,
    /// Accumulated actual minutes.
    pub actual_minutes: u32,
}

/// Reduces window tasks into a scored productivity report.
#[must_use]
pub fn build_report(tasks: &[WindowTask], window: &ReportWindow) -> ProductivityReport {
    let total = u32::try_from(tasks.len()).unwrap_or(u32::MAX);
    let completed =
        u32::try_from(tasks.iter().filter(|task| task.completed).count()).unwrap_or(u32::MAX);

    let focus_minutes = tasks
        .iter()
        .fold(0u32, |sum, task| sum.saturating_add(task.actual_minutes));

    ProductivityReport {
        total,
        completed,
        score: completion_score(completed, total),
        activity_by_day: day_buckets(tasks, window),
        goal_breakdown: goal_breakdown(tasks),
        focus_minutes,
        peak_time: peak_time(tasks),
        planning_accuracy: planning_accuracy(tasks),
        flow: flow_breakdown(tasks),
    }
}

/// Computes `round(100 * completed / total)`, 0 for an empty window.
fn completion_score(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (completed * 100 + total / 2) / total;
    u8::try_from(rounded).unwrap_or(u8::MAX)
}

/// Builds one zero-filled bucket per window day, then counts tasks into
/// their day.
fn day_buckets(tasks: &[WindowTask], window: &ReportWindow) -> Vec<DayActivity> {
    let mut counts: HashMap<NaiveDate, (u32, u32)> = HashMap::new();
    for task in tasks {
        let entry = counts.entry(task.due_date.as_naive()).or_default();
        entry.0 += 1;
        if task.completed {
            entry.1 += 1;
        }
    }

    window
        .days()
        .map(|day| {
            let (day_total, day_completed) = counts.get(&day).copied().unwrap_or_default();
            DayActivity {
                label: window.day_label(day),
                date: DueDate::from_naive(day),
                total: day_total,
                completed: day_completed,
            }
        })
        .collect()
}

/// Groups tasks by goal title, goalless tasks under the fixed bucket,
/// sorted descending by total with first-seen order on ties.
fn goal_breakdown(tasks: &[WindowTask]) -> Vec<GoalSlice> {
    let mut slices: Vec<GoalSlice> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for task in tasks {
        let key = task
            .goal_title
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED_GOAL.to_owned());
        let position = *positions.entry(key.clone()).or_insert_with(|| {
            slices.push(GoalSlice {
                goal: key,
                total: 0,
                completed: 0,
            });
            slices.len() - 1
        });
        if let Some(slice) = slices.get_mut(position) {
            slice.total += 1;
            if task.completed {
                slice.completed += 1;
            }
        }
    }

    slices.sort_by(|left, right| right.total.cmp(&left.total));
    slices
}

/// Classifies completion timestamps into a coarse time-of-day bucket by
/// majority vote, ties resolved in day order.
fn peak_time(tasks: &[WindowTask]) -> PeakTime {
    let mut morning = 0u32;
    let mut afternoon = 0u32;
    let mut evening = 0u32;
    let mut night = 0u32;
    for timestamp in tasks.iter().filter_map(|task| task.completed_at) {
        match timestamp.hour() {
            5..=11 => morning += 1,
            12..=16 => afternoon += 1,
            17..=21 => evening += 1,
            _ => night += 1,
        }
    }

    let ranked = [
        (PeakTime::Morning, morning),
        (PeakTime::Afternoon, afternoon),
        (PeakTime::Evening, evening),
        (PeakTime::Night, night),
    ];
    let mut best = PeakTime::Unknown;
    let mut best_votes = 0u32;
    for (bucket, votes) in ranked {
        if votes > best_votes {
            best = bucket;
            best_votes = votes;
        }
    }
    best
}

/// Classifies estimate quality from the mean deviation of actual against
/// estimated minutes over completed, timed tasks.
fn planning_accuracy(tasks: &[WindowTask]) -> PlanningAccuracy {
    let mut samples = 0i64;
    let mut deviation_sum = 0i64;
    for task in tasks {
        if task.completed && task.actual_minutes > 0 {
            samples += 1;
            deviation_sum += i64::from(task.actual_minutes) - i64::from(task.estimated_minutes);
        }
    }
    if samples == 0 {
        return PlanningAccuracy::Calibrated;
    }

    let mean_deviation = deviation_sum / samples;
    if mean_deviation > PLANNING_TOLERANCE_MINUTES {
        PlanningAccuracy::Underestimator
    } else if mean_deviation < -PLANNING_TOLERANCE_MINUTES {
        PlanningAccuracy::Overestimator
    } else {
        PlanningAccuracy::Calibrated
    }
}

/// Cross-tabulates planned (goal-linked) versus ad-hoc tasks against
/// completion.
fn flow_breakdown(tasks: &[WindowTask]) -> FlowBreakdown {
    let mut flow = FlowBreakdown::default();
    for task in tasks {
        match (task.goal_title.is_some(), task.completed) {
            (true, true) => flow.planned_completed += 1,
            (true, false) => flow.planned_rolled += 1,
            (false, true) => flow.adhoc_completed += 1,
            (false, false) => flow.adhoc_rolled += 1,
        }
    }
    flow
}
