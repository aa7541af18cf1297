//! In-memory reflection repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::insights::{
    domain::{Reflection, ReflectionId},
    ports::{InsightsRepositoryError, InsightsRepositoryResult, ReflectionRepository},
};
use crate::planner::domain::{DueDate, UserId};

/// Thread-safe in-memory reflection repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReflectionRepository {
    state: Arc<RwLock<HashMap<ReflectionId, Reflection>>>,
}

impl InMemoryReflectionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> InsightsRepositoryError {
    InsightsRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ReflectionRepository for InMemoryReflectionRepository {
    async fn insert(&self, reflection: &Reflection) -> InsightsRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains_key(&reflection.id()) {
            return Err(InsightsRepositoryError::DuplicateReflection(reflection.id()));
        }
        state.insert(reflection.id(), reflection.clone());
        Ok(())
    }

    async fn list_for_user(&self, user: UserId) -> InsightsRepositoryResult<Vec<Reflection>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut reflections: Vec<Reflection> = state
            .values()
            .filter(|reflection| reflection.user() == user)
            .cloned()
            .collect();
        reflections.sort_by(|left, right| {
            right
                .week_start()
                .cmp(&left.week_start())
                .then_with(|| right.created_at().cmp(&left.created_at()))
        });
        Ok(reflections)
    }

    async fn find_by_week_start(
        &self,
        user: UserId,
        week_start: DueDate,
    ) -> InsightsRepositoryResult<Option<Reflection>> {
        let reflections = self.list_for_user(user).await?;
        Ok(reflections
            .into_iter()
            .find(|reflection| reflection.week_start() == week_start))
    }
}
