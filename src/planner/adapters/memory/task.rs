//! In-memory task repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::planner::{
    domain::{DueDate, GoalId, Task, TaskId, UserId},
    ports::{PlannerRepositoryError, PlannerRepositoryResult, TaskRepository},
};

/// Thread-safe in-memory task repository.
///
/// Lookups scan the full map; planner data sets are tens of rows per user,
/// so no per-user index is kept.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
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
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> PlannerRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains_key(&task.id()) {
            return Err(PlannerRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn insert_batch(&self, tasks: &[Task]) -> PlannerRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        // Validate the whole batch before touching the map so a failure
        // stores nothing.
        for task in tasks {
            if state.contains_key(&task.id()) {
                return Err(PlannerRepositoryError::DuplicateTask(task.id()));
            }
        }
        for task in tasks {
            state.insert(task.id(), task.clone());
        }
        Ok(())
    }

    async fn update(&self, task: &Task) -> PlannerRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .get_mut(&task.id())
            .filter(|existing| existing.user() == task.user())
            .ok_or(PlannerRepositoryError::TaskNotFound(task.id()))?;
        *stored = task.clone();
        Ok(())
    }

    async fn remove(&self, user: UserId, id: TaskId) -> PlannerRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let owned = state
            .get(&id)
            .is_some_and(|task| task.user() == user);
        if !owned {
            return Err(PlannerRepositoryError::TaskNotFound(id));
        }
        state.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, user: UserId, id: TaskId) -> PlannerRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .get(&id)
            .filter(|task| task.user() == user)
            .cloned())
    }

    async fn list_for_user(&self, user: UserId) -> PlannerRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut tasks: Vec<Task> = state
            .values()
            .filter(|task| task.user() == user)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.created_at(), task.id().into_inner()));
        Ok(tasks)
    }

    async fn list_scheduled_between(
        &self,
        user: UserId,
        from: DueDate,
        to: DueDate,
    ) -> PlannerRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut tasks: Vec<Task> = state
            .values()
            .filter(|task| task.user() == user)
            .filter(|task| {
                task.due_date()
                    .is_some_and(|due| due >= from && due <= to)
            })
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.due_date(), task.created_at()));
        Ok(tasks)
    }

    async fn clear_goal(&self, user: UserId, goal: GoalId) -> PlannerRepositoryResult<u64> {
        let mut state = self.state.write().map_err(lock_error)?;
        let mut detached: u64 = 0;
        for task in state.values_mut() {
            if task.user() == user && task.goal() == Some(goal) {
                let mut data = task.to_persisted();
                data.goal = None;
                *task = Task::from_persisted(data);
                detached += 1;
            }
        }
        Ok(detached)
    }
}
