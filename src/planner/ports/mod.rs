//! Port contracts for planner persistence.

mod repository;

pub use repository::{
    BlueprintRepository, GoalRepository, PlannerRepositoryError, PlannerRepositoryResult,
    TaskRepository,
};
