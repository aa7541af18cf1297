//! Repository ports for task, goal, and blueprint persistence.

use crate::planner::domain::{
    Blueprint, BlueprintId, DueDate, Goal, GoalId, Task, TaskId, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for planner repository operations.
pub type PlannerRepositoryResult<T> = Result<T, PlannerRepositoryError>;

/// Task persistence contract.
///
/// All lookups are scoped to the owning user; a task belonging to another
/// user behaves as if it did not exist.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn insert(&self, task: &Task) -> PlannerRepositoryResult<()>;

    /// Stores a batch of new tasks in a single write.
    ///
    /// The batch is all-or-nothing: a failure stores none of the tasks.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerRepositoryError::DuplicateTask`] when any task ID
    /// already exists.
    async fn insert_batch(&self, tasks: &[Task]) -> PlannerRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerRepositoryError::TaskNotFound`] when the task does
    /// not exist for the owning user.
    async fn update(&self, task: &Task) -> PlannerRepositoryResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerRepositoryError::TaskNotFound`] when the task does
    /// not exist for the user.
    async fn remove(&self, user: UserId, id: TaskId) -> PlannerRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist for the user.
    async fn find_by_id(&self, user: UserId, id: TaskId) -> PlannerRepositoryResult<Option<Task>>;

    /// Returns all of the user's tasks, ordered by creation time.
    async fn list_for_user(&self, user: UserId) -> PlannerRepositoryResult<Vec<Task>>;

    /// Returns the user's dated tasks whose due date falls within the
    /// inclusive range, ordered by due date then creation time.
    ///
    /// Undated (inbox/backlog) tasks are excluded.
    async fn list_scheduled_between(
        &self,
        user: UserId,
        from: DueDate,
        to: DueDate,
    ) -> PlannerRepositoryResult<Vec<Task>>;

    /// Detaches every task of the user linked to the goal, returning the
    /// number of tasks touched.
    async fn clear_goal(&self, user: UserId, goal: GoalId) -> PlannerRepositoryResult<u64>;
}

/// Goal persistence contract.
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Stores a new goal.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerRepositoryError::DuplicateGoal`] when the goal ID
    /// already exists.
    async fn insert(&self, goal: &Goal) -> PlannerRepositoryResult<()>;

    /// Persists changes to an existing goal.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerRepositoryError::GoalNotFound`] when the goal does
    /// not exist for the owning user.
    async fn update(&self, goal: &Goal) -> PlannerRepositoryResult<()>;

    /// Deletes a goal.
    ///
    /// Task detachment is the caller's responsibility; the repository only
    /// removes the goal row.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerRepositoryError::GoalNotFound`] when the goal does
    /// not exist for the user.
    async fn remove(&self, user: UserId, id: GoalId) -> PlannerRepositoryResult<()>;

    /// Finds a goal by identifier.
    ///
    /// Returns `None` when the goal does not exist for the user.
    async fn find_by_id(&self, user: UserId, id: GoalId) -> PlannerRepositoryResult<Option<Goal>>;

    /// Returns all of the user's goals, ordered by creation time.
    async fn list_for_user(&self, user: UserId) -> PlannerRepositoryResult<Vec<Goal>>;
}

/// Blueprint persistence contract.
#[async_trait]
pub trait BlueprintRepository: Send + Sync {
    /// Stores a new blueprint.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerRepositoryError::DuplicateBlueprint`] when the
    /// blueprint ID already exists.
    async fn insert(&self, blueprint: &Blueprint) -> PlannerRepositoryResult<()>;

    /// Deletes a blueprint.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerRepositoryError::BlueprintNotFound`] when the
    /// blueprint does not exist for the user.
    async fn remove(&self, user: UserId, id: BlueprintId) -> PlannerRepositoryResult<()>;

    /// Returns all of the user's blueprints, ordered by creation time.
    async fn list_for_user(&self, user: UserId) -> PlannerRepositoryResult<Vec<Blueprint>>;
}

/// Errors returned by planner repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PlannerRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A goal with the same identifier already exists.
    #[error("duplicate goal identifier: {0}")]
    DuplicateGoal(GoalId),

    /// A blueprint with the same identifier already exists.
    #[error("duplicate blueprint identifier: {0}")]
    DuplicateBlueprint(BlueprintId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The goal was not found.
    #[error("goal not found: {0}")]
    GoalNotFound(GoalId),

    /// The blueprint was not found.
    #[error("blueprint not found: {0}")]
    BlueprintNotFound(BlueprintId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PlannerRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
