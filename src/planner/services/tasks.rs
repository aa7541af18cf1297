//! Service layer for task capture, editing, and timer bookkeeping.

use crate::planner::{
    domain::{
        DueDate, DurationMinutes, GoalId, Priority, StartTime, Task, TaskDraft, TaskId, Title,
        UserId,
    },
    ports::TaskRepository,
};
use mockable::Clock;
use std::sync::Arc;

use super::{PlanningError, PlanningResult};

/// Request payload for creating a task from form input.
///
/// Dates, times, durations, and priorities arrive as raw form values and
/// are validated by the service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateTaskRequest {
    title: String,
    due_date: Option<String>,
    start_time: Option<String>,
    goal: Option<GoalId>,
    duration_minutes: Option<u32>,
    priority: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the `YYYY-MM-DD` due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets the `HH:MM` daily timeline start.
    #[must_use]
    pub fn with_start_time(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    /// Links the task to a goal.
    #[must_use]
    pub const fn with_goal(mut self, goal: GoalId) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Sets the duration estimate in minutes.
    #[must_use]
    pub const fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Sets the priority label.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Task planning orchestration service.
#[derive(Clone)]
pub struct TaskPlanningService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskPlanningService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task planning service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a new task from form input.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError`] when input validation fails or the
    /// repository rejects persistence.
    pub async fn create(&self, user: UserId, request: CreateTaskRequest) -> PlanningResult<Task> {
        let mut draft = TaskDraft::new(Title::new(request.title)?);
        if let Some(raw_date) = request.due_date {
            draft.due_date = Some(DueDate::parse(&raw_date)?);
        }
        if let Some(raw_time) = request.start_time {
            draft.start_time = Some(StartTime::parse(&raw_time)?);
        }
        if let Some(minutes) = request.duration_minutes {
            draft.duration = DurationMinutes::new(minutes)?;
        }
        if let Some(raw_priority) = request.priority {
            draft.priority = Priority::try_from(raw_priority.as_str())?;
        }
        draft.goal = request.goal;

        let task = Task::from_draft(user, draft, &*self.clock);
        self.repository.insert(&task).await?;
        Ok(task)
    }

    /// Creates tasks in bulk from a list of generated step titles.
    ///
    /// Titles that are empty after trimming are skipped; nothing is
    /// written when no title survives.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Repository`] when the batch insert fails.
    pub async fn add_steps(
        &self,
        user: UserId,
        titles: Vec<String>,
        goal: Option<GoalId>,
    ) -> PlanningResult<Vec<Task>> {
        let mut batch = Vec::new();
        for raw_title in titles {
            if let Ok(title) = Title::new(raw_title) {
                let mut draft = TaskDraft::new(title);
                draft.goal = goal;
                batch.push(Task::from_draft(user, draft, &*self.clock));
            }
        }
        if batch.is_empty() {
            return Ok(Vec::new());
        }
        self.repository.insert_batch(&batch).await?;
        Ok(batch)
    }

    /// Flips a task's completion flag.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::UnknownTask`] when the task does not exist
    /// for the user.
    pub async fn toggle_completion(&self, user: UserId, id: TaskId) -> PlanningResult<Task> {
        let mut task = self.load(user, id).await?;
        task.toggle_completion(&*self.clock);
        self.persist(task).await
    }

    /// Replaces a task's title.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError`] when the title is empty or the task does
    /// not exist for the user.
    pub async fn rename(&self, user: UserId, id: TaskId, title: &str) -> PlanningResult<Task> {
        let validated = Title::new(title)?;
        let mut task = self.load(user, id).await?;
        task.rename(validated, &*self.clock);
        self.persist(task).await
    }

    /// Moves a task to a new date and timeline slot.
    ///
    /// Passing `None` for the date returns the task to the inbox/backlog;
    /// passing `None` for the time makes a dated task all-day.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError`] when a value fails to parse or the task
    /// does not exist for the user.
    pub async fn reschedule(
        &self,
        user: UserId,
        id: TaskId,
        due_date: Option<&str>,
        start_time: Option<&str>,
    ) -> PlanningResult<Task> {
        let parsed_date = due_date.map(DueDate::parse).transpose()?;
        let parsed_time = start_time.map(StartTime::parse).transpose()?;
        let mut task = self.load(user, id).await?;
        task.reschedule(parsed_date, parsed_time, &*self.clock);
        self.persist(task).await
    }

    /// Replaces a task's duration estimate.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError`] when the duration is invalid or the task
    /// does not exist for the user.
    pub async fn set_duration(
        &self,
        user: UserId,
        id: TaskId,
        minutes: u32,
    ) -> PlanningResult<Task> {
        let duration = DurationMinutes::new(minutes)?;
        let mut task = self.load(user, id).await?;
        task.set_duration(duration, &*self.clock);
        self.persist(task).await
    }

    /// Links a task to a goal, or detaches it when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::UnknownTask`] when the task does not exist
    /// for the user.
    pub async fn assign_goal(
        &self,
        user: UserId,
        id: TaskId,
        goal: Option<GoalId>,
    ) -> PlanningResult<Task> {
        let mut task = self.load(user, id).await?;
        task.assign_goal(goal, &*self.clock);
        self.persist(task).await
    }

    /// Starts a task's focus timer; a second start overwrites the marker.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::UnknownTask`] when the task does not exist
    /// for the user.
    pub async fn start_timer(&self, user: UserId, id: TaskId) -> PlanningResult<Task> {
        let mut task = self.load(user, id).await?;
        task.start_timer(&*self.clock);
        self.persist(task).await
    }

    /// Stops a task's focus timer, accumulating elapsed minutes.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::UnknownTask`] when the task does not exist
    /// for the user.
    pub async fn stop_timer(&self, user: UserId, id: TaskId) -> PlanningResult<Task> {
        let mut task = self.load(user, id).await?;
        task.stop_timer(&*self.clock);
        self.persist(task).await
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Repository`] when the task does not exist
    /// for the user or the delete fails.
    pub async fn delete(&self, user: UserId, id: TaskId) -> PlanningResult<()> {
        self.repository.remove(user, id).await?;
        Ok(())
    }

    /// Finds a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist for the user.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Repository`] when the lookup fails.
    pub async fn find(&self, user: UserId, id: TaskId) -> PlanningResult<Option<Task>> {
        Ok(self.repository.find_by_id(user, id).await?)
    }

    /// Returns all of the user's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Repository`] when the lookup fails.
    pub async fn list(&self, user: UserId) -> PlanningResult<Vec<Task>> {
        Ok(self.repository.list_for_user(user).await?)
    }

    async fn load(&self, user: UserId, id: TaskId) -> PlanningResult<Task> {
        self.repository
            .find_by_id(user, id)
            .await?
            .ok_or(PlanningError::UnknownTask(id))
    }

    async fn persist(&self, task: Task) -> PlanningResult<Task> {
        self.repository.update(&task).await?;
        Ok(task)
    }
}
