//! Repository port for reflection persistence.

use crate::insights::domain::{Reflection, ReflectionId};
use crate::planner::domain::{DueDate, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for insights repository operations.
pub type InsightsRepositoryResult<T> = Result<T, InsightsRepositoryError>;

/// Reflection persistence contract.
#[async_trait]
pub trait ReflectionRepository: Send + Sync {
    /// Stores a new reflection.
    ///
    /// # Errors
    ///
    /// Returns [`InsightsRepositoryError::DuplicateReflection`] when the
    /// reflection ID already exists.
    async fn insert(&self, reflection: &Reflection) -> InsightsRepositoryResult<()>;

    /// Returns all of the user's reflections, newest week first.
    async fn list_for_user(&self, user: UserId) -> InsightsRepositoryResult<Vec<Reflection>>;

    /// Finds the user's reflection for the week starting on the given
    /// Monday.
    ///
    /// Returns the most recent record when several exist for the week.
    async fn find_by_week_start(
        &self,
        user: UserId,
        week_start: DueDate,
    ) -> InsightsRepositoryResult<Option<Reflection>>;
}

/// Errors returned by insights repository implementations.
#[derive(Debug, Clone, Error)]
pub enum InsightsRepositoryError {
    /// A reflection with the same identifier already exists.
    #[error("duplicate reflection identifier: {0}")]
    DuplicateReflection(ReflectionId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl InsightsRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
