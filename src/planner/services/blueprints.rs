//! Service layer for blueprint management and week application.

use crate::planner::{
    domain::{
        Blueprint, BlueprintId, DaySelector, DueDate, DurationMinutes, ExistingWeekTask,
        NewBlueprintData, Priority, Task, Title, UserId, WeekWindow, expand_blueprints,
    },
    ports::{BlueprintRepository, TaskRepository},
};
use mockable::Clock;
use std::sync::Arc;

use super::PlanningResult;

/// Request payload for creating a blueprint from form input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateBlueprintRequest {
    title: String,
    day_code: Option<i16>,
    duration_minutes: Option<u32>,
    priority: Option<String>,
}

impl CreateBlueprintRequest {
    /// Creates a request with the required title; the blueprint defaults
    /// to an undated template.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the day-of-week code (0-6 weekday with 0 = Sunday, 7 every
    /// day, 8 weekdays, 9 weekend).
    #[must_use]
    pub const fn with_day_code(mut self, code: i16) -> Self {
        self.day_code = Some(code);
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

/// Blueprint orchestration service.
#[derive(Clone)]
pub struct BlueprintService<B, T, C>
where
    B: BlueprintRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    blueprints: Arc<B>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<B, T, C> BlueprintService<B, T, C>
where
    B: BlueprintRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new blueprint service.
    #[must_use]
    pub const fn new(blueprints: Arc<B>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            blueprints,
            tasks,
            clock,
        }
    }

    /// Creates a new blueprint from form input.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError`](super::PlanningError) when input
    /// validation fails or the repository rejects persistence.
    pub async fn create(
        &self,
        user: UserId,
        request: CreateBlueprintRequest,
    ) -> PlanningResult<Blueprint> {
        let title = Title::new(request.title)?;
        let day = DaySelector::from_code(request.day_code)?;
        let duration = request
            .duration_minutes
            .map_or_else(|| Ok(DurationMinutes::default()), DurationMinutes::new)?;
        let priority = request
            .priority
            .as_deref()
            .map_or_else(|| Ok(Priority::default()), Priority::try_from)?;

        let blueprint = Blueprint::new(
            NewBlueprintData {
                user,
                title,
                day,
                duration,
                priority,
            },
            &*self.clock,
        );
        self.blueprints.insert(&blueprint).await?;
        Ok(blueprint)
    }

    /// Deletes a blueprint.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Repository`](super::PlanningError) when
    /// the blueprint does not exist for the user.
    pub async fn delete(&self, user: UserId, id: BlueprintId) -> PlanningResult<()> {
        self.blueprints.remove(user, id).await?;
        Ok(())
    }

    /// Returns all of the user's blueprints.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Repository`](super::PlanningError) when
    /// the lookup fails.
    pub async fn list(&self, user: UserId) -> PlanningResult<Vec<Blueprint>> {
        Ok(self.blueprints.list_for_user(user).await?)
    }

    /// Expands the user's blueprints into the week containing the target
    /// date, inserting the instances that survive duplicate suppression.
    ///
    /// Returns the number of tasks created. The write is fire-and-forget:
    /// an insert failure is logged and reported as zero creations rather
    /// than surfaced, and the whole batch is dropped. Fetch failures still
    /// propagate.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError`](super::PlanningError) when the target
    /// date is invalid or a fetch fails.
    pub async fn apply_week(&self, user: UserId, target_date: &str) -> PlanningResult<usize> {
        let target = DueDate::parse(target_date)?;
        let blueprints = self.blueprints.list_for_user(user).await?;
        if blueprints.is_empty() {
            return Ok(0);
        }

        let week = WeekWindow::containing(target);
        let existing: Vec<ExistingWeekTask> = self
            .tasks
            .list_scheduled_between(user, week.first_day(), week.last_day())
            .await?
            .iter()
            .filter_map(|task| {
                task.due_date().map(|due_date| ExistingWeekTask {
                    title: task.title().clone(),
                    due_date,
                })
            })
            .collect();

        let drafts = expand_blueprints(&blueprints, &existing, target);
        if drafts.is_empty() {
            return Ok(0);
        }

        let batch: Vec<Task> = drafts
            .into_iter()
            .map(|draft| Task::from_draft(user, draft, &*self.clock))
            .collect();
        if let Err(error) = self.tasks.insert_batch(&batch).await {
            tracing::warn!(%user, %error, "blueprint week application failed; batch dropped");
            return Ok(0);
        }
        Ok(batch.len())
    }
}
