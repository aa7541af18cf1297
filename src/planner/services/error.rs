//! Service-level errors for planning operations.

use crate::planner::{
    domain::{GoalId, ParsePriorityError, PlannerDomainError, TaskId},
    ports::PlannerRepositoryError,
};
use thiserror::Error;

/// Service-level errors for planning operations.
#[derive(Debug, Error)]
pub enum PlanningError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] PlannerDomainError),

    /// A priority value could not be parsed.
    #[error(transparent)]
    Priority(#[from] ParsePriorityError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] PlannerRepositoryError),

    /// The referenced task does not exist for the user.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    /// The referenced goal does not exist for the user.
    #[error("unknown goal: {0}")]
    UnknownGoal(GoalId),
}

/// Result type for planning service operations.
pub type PlanningResult<T> = Result<T, PlanningError>;
