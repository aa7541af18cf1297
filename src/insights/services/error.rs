//! Service-level errors for insights operations.

use crate::insights::{
    domain::InsightsDomainError,
    ports::{InsightsRepositoryError, SummarizerError},
};
use crate::planner::{domain::PlannerDomainError, ports::PlannerRepositoryError};
use thiserror::Error;

/// Service-level errors for insights operations.
#[derive(Debug, Error)]
pub enum InsightsError {
    /// Insights domain validation failed.
    #[error(transparent)]
    Domain(#[from] InsightsDomainError),

    /// Planner domain validation failed (dates, titles).
    #[error(transparent)]
    Planner(#[from] PlannerDomainError),

    /// Task or goal lookup failed.
    #[error(transparent)]
    Tasks(#[from] PlannerRepositoryError),

    /// Reflection persistence failed.
    #[error(transparent)]
    Repository(#[from] InsightsRepositoryError),

    /// The text-generation collaborator failed.
    #[error(transparent)]
    Summarizer(#[from] SummarizerError),

    /// The reflection prompt failed to render.
    #[error("prompt rendering failed: {0}")]
    Prompt(String),
}

/// Result type for insights service operations.
pub type InsightsResult<T> = Result<T, InsightsError>;
