//! In-memory blueprint repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::planner::{
    domain::{Blueprint, BlueprintId, UserId},
    ports::{BlueprintRepository, PlannerRepositoryError, PlannerRepositoryResult},
};

/// Thread-safe in-memory blueprint repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlueprintRepository {
    state: Arc<RwLock<HashMap<BlueprintId, Blueprint>>>,
}

impl InMemoryBlueprintRepository {
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
impl BlueprintRepository for InMemoryBlueprintRepository {
    async fn insert(&self, blueprint: &Blueprint) -> PlannerRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains_key(&blueprint.id()) {
            return Err(PlannerRepositoryError::DuplicateBlueprint(blueprint.id()));
        }
        state.insert(blueprint.id(), blueprint.clone());
        Ok(())
    }

    async fn remove(&self, user: UserId, id: BlueprintId) -> PlannerRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let owned = state
            .get(&id)
            .is_some_and(|blueprint| blueprint.user() == user);
        if !owned {
            return Err(PlannerRepositoryError::BlueprintNotFound(id));
        }
        state.remove(&id);
        Ok(())
    }

    async fn list_for_user(&self, user: UserId) -> PlannerRepositoryResult<Vec<Blueprint>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut blueprints: Vec<Blueprint> = state
            .values()
            .filter(|blueprint| blueprint.user() == user)
            .cloned()
            .collect();
        blueprints.sort_by_key(|blueprint| (blueprint.created_at(), blueprint.id().into_inner()));
        Ok(blueprints)
    }
}
