//! In-memory goal repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::planner::{
    domain::{Goal, GoalId, UserId},
    ports::{GoalRepository, PlannerRepositoryError, PlannerRepositoryResult},
};

/// Thread-safe in-memory goal repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGoalRepository {
    state: Arc<RwLock<HashMap<GoalId, Goal>>>,
}

impl InMemoryGoalRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> PlannerRepositoryError {
    PlannerRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl GoalRepository for InMemoryGoalRepository {
    async fn insert(&self, goal: &Goal) -> PlannerRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains_key(&goal.id()) {
            return Err(PlannerRepositoryError::DuplicateGoal(goal.id()));
        }
        state.insert(goal.id(), goal.clone());
        Ok(())
    }

    async fn update(&self, goal: &Goal) -> PlannerRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .get_mut(&goal.id())
            .filter(|existing| existing.user() == goal.user())
            .ok_or(PlannerRepositoryError::GoalNotFound(goal.id()))?;
        *stored = goal.clone();
        Ok(())
    }

    async fn remove(&self, user: UserId, id: GoalId) -> PlannerRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let owned = state.get(&id).is_some_and(|goal| goal.user() == user);
        if !owned {
            return Err(PlannerRepositoryError::GoalNotFound(id));
        }
        state.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, user: UserId, id: GoalId) -> PlannerRepositoryResult<Option<Goal>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .get(&id)
            .filter(|goal| goal.user() == user)
            .cloned())
    }

    async fn list_for_user(&self, user: UserId) -> PlannerRepositoryResult<Vec<Goal>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut goals: Vec<Goal> = state
            .values()
            .filter(|goal| goal.user() == user)
            .cloned()
            .collect();
        goals.sort_by_key(|goal| (goal.created_at(), goal.id().into_inner()));
        Ok(goals)
    }
}
