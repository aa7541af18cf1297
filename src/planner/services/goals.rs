//! Service layer for goal management.

use crate::planner::{
    domain::{Goal, GoalId, Title, UserId},
    ports::{GoalRepository, TaskRepository},
};
use mockable::Clock;
use std::sync::Arc;

use super::{PlanningError, PlanningResult};

/// Goal management orchestration service.
#[derive(Clone)]
pub struct GoalService<G, T, C>
where
    G: GoalRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    goals: Arc<G>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<G, T, C> GoalService<G, T, C>
where
    G: GoalRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new goal service.
    #[must_use]
    pub const fn new(goals: Arc<G>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            goals,
            tasks,
            clock,
        }
    }

    /// Creates a new goal.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError`] when the title is empty or persistence
    /// fails.
    pub async fn create(&self, user: UserId, title: &str) -> PlanningResult<Goal> {
        let goal = Goal::new(user, Title::new(title)?, &*self.clock);
        self.goals.insert(&goal).await?;
        Ok(goal)
    }

    /// Replaces a goal's title.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::UnknownGoal`] when the goal does not exist
    /// for the user.
    pub async fn rename(&self, user: UserId, id: GoalId, title: &str) -> PlanningResult<Goal> {
        let validated = Title::new(title)?;
        let mut goal = self
            .goals
            .find_by_id(user, id)
            .await?
            .ok_or(PlanningError::UnknownGoal(id))?;
        goal.rename(validated, &*self.clock);
        self.goals.update(&goal).await?;
        Ok(goal)
    }

    /// Deletes a goal, detaching its tasks first.
    ///
    /// Returns the number of tasks detached. Tasks survive goal deletion;
    /// only the reference is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::UnknownGoal`] when the goal does not exist
    /// for the user.
    pub async fn delete(&self, user: UserId, id: GoalId) -> PlanningResult<u64> {
        let goal = self
            .goals
            .find_by_id(user, id)
            .await?
            .ok_or(PlanningError::UnknownGoal(id))?;
        let detached = self.tasks.clear_goal(user, goal.id()).await?;
        self.goals.remove(user, id).await?;
        Ok(detached)
    }

    /// Returns all of the user's goals.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Repository`] when the lookup fails.
    pub async fn list(&self, user: UserId) -> PlanningResult<Vec<Goal>> {
        Ok(self.goals.list_for_user(user).await?)
    }
}
