//! Error types for planner domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain planner values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlannerDomainError {
    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The duration is outside the supported range.
    #[error("invalid duration {0} minutes, expected 1 to 1440")]
    InvalidDuration(u32),

    /// The day-of-week code is outside the recognised 0-9 domain.
    #[error("invalid day-of-week code {0}, expected 0-6, 7, 8, or 9")]
    InvalidDayCode(i16),

    /// The due date does not follow `YYYY-MM-DD`.
    #[error("invalid due date '{0}', expected YYYY-MM-DD")]
    InvalidDueDate(String),

    /// The start time does not follow `HH:MM`.
    #[error("invalid start time '{0}', expected HH:MM")]
    InvalidStartTime(String),
}

/// Error returned while parsing priorities from persistence or form input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
