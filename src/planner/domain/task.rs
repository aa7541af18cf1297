//! Task aggregate root and related planning types.

use super::{DueDate, GoalId, ParsePriorityError, PlannerDomainError, StartTime, TaskId, Title, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can slip without consequence.
    Low,
    /// Ordinary work.
    #[default]
    Medium,
    /// Must happen.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Estimated task duration in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DurationMinutes(u32);

impl DurationMinutes {
    /// Largest supported estimate: one full day.
    const MAX_MINUTES: u32 = 24 * 60;

    /// Default estimate for tasks created without one.
    const DEFAULT_MINUTES: u32 = 60;

    /// Creates a validated duration.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerDomainError::InvalidDuration`] when the value is
    /// zero or exceeds one day.
    pub const fn new(minutes: u32) -> Result<Self, PlannerDomainError> {
        if minutes == 0 || minutes > Self::MAX_MINUTES {
            return Err(PlannerDomainError::InvalidDuration(minutes));
        }
        Ok(Self(minutes))
    }

    /// Returns the underlying minute count.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl Default for DurationMinutes {
    fn default() -> Self {
        Self(Self::DEFAULT_MINUTES)
    }
}

/// Where a task sits in the planning taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// No due date and no goal; captured for later triage.
    Inbox,
    /// No due date but linked to a goal.
    Backlog,
    /// Dated but not placed on the daily timeline.
    AllDay,
    /// Dated with a start time on the daily timeline.
    TimeBlocked,
}

/// Insert payload for a task, produced by direct capture, blueprint
/// expansion, or bulk step insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Task title.
    pub title: Title,
    /// Optional calendar date; `None` keeps the task in the inbox/backlog.
    pub due_date: Option<DueDate>,
    /// Optional daily timeline placement.
    pub start_time: Option<StartTime>,
    /// Optional goal link.
    pub goal: Option<GoalId>,
    /// Estimated duration.
    pub duration: DurationMinutes,
    /// Priority.
    pub priority: Priority,
}

impl TaskDraft {
    /// Creates a draft with defaults for everything but the title.
    #[must_use]
    pub const fn new(title: Title) -> Self {
        Self {
            title,
            due_date: None,
            start_time: None,
            goal: None,
            duration: DurationMinutes(DurationMinutes::DEFAULT_MINUTES),
            priority: Priority::Medium,
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    user: UserId,
    title: Title,
    due_date: Option<DueDate>,
    goal: Option<GoalId>,
    start_time: Option<StartTime>,
    duration: DurationMinutes,
    completed: bool,
    completed_at: Option<DateTime<Utc>>,
    priority: Priority,
    actual_minutes: u32,
    timer_started_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning user.
    pub user: UserId,
    /// Persisted title.
    pub title: Title,
    /// Persisted due date, if any.
    pub due_date: Option<DueDate>,
    /// Persisted goal link, if any.
    pub goal: Option<GoalId>,
    /// Persisted start time, if any.
    pub start_time: Option<StartTime>,
    /// Persisted duration estimate.
    pub duration: DurationMinutes,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted accumulated actual minutes.
    pub actual_minutes: u32,
    /// Persisted running-timer marker, if any.
    pub timer_started_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Materialises a draft into a new task owned by the given user.
    #[must_use]
    pub fn from_draft(user: UserId, draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            user,
            title: draft.title,
            due_date: draft.due_date,
            goal: draft.goal,
            start_time: draft.start_time,
            duration: draft.duration,
            completed: false,
            completed_at: None,
            priority: draft.priority,
            actual_minutes: 0,
            timer_started_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            user: data.user,
            title: data.title,
            due_date: data.due_date,
            goal: data.goal,
            start_time: data.start_time,
            duration: data.duration,
            completed: data.completed,
            completed_at: data.completed_at,
            priority: data.priority,
            actual_minutes: data.actual_minutes,
            timer_started_at: data.timer_started_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Exports the aggregate as persistence data.
    ///
    /// Adapters use the round trip through [`PersistedTaskData`] for row
    /// construction and storage-level field rewrites.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedTaskData {
        PersistedTaskData {
            id: self.id,
            user: self.user,
            title: self.title.clone(),
            due_date: self.due_date,
            goal: self.goal,
            start_time: self.start_time,
            duration: self.duration,
            completed: self.completed,
            completed_at: self.completed_at,
            priority: self.priority,
            actual_minutes: self.actual_minutes,
            timer_started_at: self.timer_started_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user(&self) -> UserId {
        self.user
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDate> {
        self.due_date
    }

    /// Returns the linked goal, if any.
    #[must_use]
    pub const fn goal(&self) -> Option<GoalId> {
        self.goal
    }

    /// Returns the daily timeline placement, if any.
    #[must_use]
    pub const fn start_time(&self) -> Option<StartTime> {
        self.start_time
    }

    /// Returns the duration estimate.
    #[must_use]
    pub const fn duration(&self) -> DurationMinutes {
        self.duration
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the completion timestamp, if completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the accumulated actual minutes.
    #[must_use]
    pub const fn actual_minutes(&self) -> u32 {
        self.actual_minutes
    }

    /// Returns the running-timer marker, if a timer is running.
    #[must_use]
    pub const fn timer_started_at(&self) -> Option<DateTime<Utc>> {
        self.timer_started_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Classifies the task within the planning taxonomy.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        match (self.due_date, self.goal, self.start_time) {
            (None, None, _) => Placement::Inbox,
            (None, Some(_), _) => Placement::Backlog,
            (Some(_), _, None) => Placement::AllDay,
            (Some(_), _, Some(_)) => Placement::TimeBlocked,
        }
    }

    /// Flips the completion flag, stamping or clearing the completion
    /// timestamp.
    pub fn toggle_completion(&mut self, clock: &impl Clock) {
        self.completed = !self.completed;
        self.completed_at = self.completed.then(|| clock.utc());
        self.touch(clock);
    }

    /// Replaces the title.
    pub fn rename(&mut self, title: Title, clock: &impl Clock) {
        self.title = title;
        self.touch(clock);
    }

    /// Moves the task to a new date and timeline slot.
    ///
    /// Passing `None` for the date returns the task to the inbox/backlog;
    /// passing `None` for the time makes a dated task all-day.
    pub fn reschedule(
        &mut self,
        due_date: Option<DueDate>,
        start_time: Option<StartTime>,
        clock: &impl Clock,
    ) {
        self.due_date = due_date;
        self.start_time = start_time;
        self.touch(clock);
    }

    /// Replaces the duration estimate.
    pub fn set_duration(&mut self, duration: DurationMinutes, clock: &impl Clock) {
        self.duration = duration;
        self.touch(clock);
    }

    /// Links the task to a goal, or detaches it when `None`.
    pub fn assign_goal(&mut self, goal: Option<GoalId>, clock: &impl Clock) {
        self.goal = goal;
        self.touch(clock);
    }

    /// Starts the focus timer.
    ///
    /// A second start overwrites the running marker; last write wins, with
    /// no coordination across concurrent sessions.
    pub fn start_timer(&mut self, clock: &impl Clock) {
        self.timer_started_at = Some(clock.utc());
        self.touch(clock);
    }

    /// Stops the focus timer, accumulating elapsed whole minutes into the
    /// actual duration and clearing the running marker.
    ///
    /// A stop without a running timer is a no-op.
    pub fn stop_timer(&mut self, clock: &impl Clock) {
        if let Some(started_at) = self.timer_started_at.take() {
            let now = clock.utc();
            let elapsed_minutes = (now - started_at).num_minutes().max(0);
            let minutes = u32::try_from(elapsed_minutes).unwrap_or(u32::MAX);
            self.actual_minutes = self.actual_minutes.saturating_add(minutes);
            self.touch(clock);
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
