//! Blueprint expansion into concrete week instances.
//!
//! Expansion is a pure function: callers fetch the user's blueprints and
//! the tasks already scheduled in the target week, and receive the insert
//! payload for the instances that survive duplicate suppression.

use super::{Blueprint, DueDate, Title, WeekWindow, task::TaskDraft};
use std::collections::HashSet;

/// Title and date of a task already scheduled in the target week, used for
/// duplicate suppression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingWeekTask {
    /// Title of the existing task.
    pub title: Title,
    /// Due date of the existing task.
    pub due_date: DueDate,
}

/// Expands blueprints into the task drafts to insert for the week
/// containing `target`.
///
/// Each blueprint resolves to zero or more dated instances within the
/// Monday-Sunday week, or to a single undated inbox instance. A dated
/// instance is suppressed when an existing task in the week carries the
/// same title (case-insensitively, ignoring surrounding whitespace) on the
/// same date. Undated instances are never suppressed. The collision set is
/// a snapshot of the existing tasks only: instances expanded within the
/// same call do not suppress each other.
#[must_use]
pub fn expand_blueprints(
    blueprints: &[Blueprint],
    existing: &[ExistingWeekTask],
    target: DueDate,
) -> Vec<TaskDraft> {
    if blueprints.is_empty() {
        return Vec::new();
    }

    let week = WeekWindow::containing(target);
    let taken: HashSet<String> = existing
        .iter()
        .map(|task| signature(&task.title, task.due_date))
        .collect();

    let mut drafts = Vec::new();
    for blueprint in blueprints {
        match blueprint.day().week_offsets() {
            None => drafts.push(draft_from(blueprint, None)),
            Some(offsets) => {
                for offset in offsets {
                    let due_date = week.date_at_offset(offset);
                    if taken.contains(&signature(blueprint.title(), due_date)) {
                        continue;
                    }
                    drafts.push(draft_from(blueprint, Some(due_date)));
                }
            }
        }
    }
    drafts
}

/// Builds the duplicate-suppression key for a title on a date.
fn signature(title: &Title, due_date: DueDate) -> String {
    format!("{}|{}", title.normalized_key(), due_date)
}

/// Copies blueprint fields onto an instance draft.
fn draft_from(blueprint: &Blueprint, due_date: Option<DueDate>) -> TaskDraft {
    TaskDraft {
        title: blueprint.title().clone(),
        due_date,
        start_time: None,
        goal: None,
        duration: blueprint.duration(),
        priority: blueprint.priority(),
    }
}
