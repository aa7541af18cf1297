//! Reflection aggregate root.

use super::InsightsDomainError;
use crate::planner::domain::{DueDate, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a reflection record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReflectionId(Uuid);

impl ReflectionId {
    /// Creates a new random reflection identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a reflection identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ReflectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReflectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Self-reported energy level on a 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnergyRating(u8);

impl EnergyRating {
    /// Creates a validated energy rating.
    ///
    /// # Errors
    ///
    /// Returns [`InsightsDomainError::InvalidEnergyRating`] when the value
    /// is outside 1-5.
    pub const fn new(value: u8) -> Result<Self, InsightsDomainError> {
        if value == 0 || value > 5 {
            return Err(InsightsDomainError::InvalidEnergyRating(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying rating.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Weekly reflection record.
///
/// Reflections are either written by the user (carrying an energy rating)
/// or generated from a productivity report (carrying the prompt hash of
/// the generation call).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    id: ReflectionId,
    user: UserId,
    week_start: DueDate,
    summary: String,
    energy: Option<EnergyRating>,
    tasks_completed: u32,
    tasks_scheduled: u32,
    focus_goals: Vec<String>,
    prompt_hash: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for creating a new reflection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReflectionData {
    /// Owning user.
    pub user: UserId,
    /// Monday opening the reflected week.
    pub week_start: DueDate,
    /// Free-text reflection body.
    pub summary: String,
    /// Self-reported energy, absent on generated reflections.
    pub energy: Option<EnergyRating>,
    /// Tasks completed during the week.
    pub tasks_completed: u32,
    /// Tasks scheduled during the week.
    pub tasks_scheduled: u32,
    /// Forward-looking focus goals.
    pub focus_goals: Vec<String>,
    /// Hash of the generation prompt, present on generated reflections.
    pub prompt_hash: Option<String>,
}

/// Parameter object for reconstructing a persisted reflection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedReflectionData {
    /// Persisted reflection identifier.
    pub id: ReflectionId,
    /// Persisted owning user.
    pub user: UserId,
    /// Persisted week start.
    pub week_start: DueDate,
    /// Persisted reflection body.
    pub summary: String,
    /// Persisted energy rating, if any.
    pub energy: Option<EnergyRating>,
    /// Persisted completed count.
    pub tasks_completed: u32,
    /// Persisted scheduled count.
    pub tasks_scheduled: u32,
    /// Persisted focus goals.
    pub focus_goals: Vec<String>,
    /// Persisted prompt hash, if any.
    pub prompt_hash: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Reflection {
    /// Creates a new reflection.
    #[must_use]
    pub fn new(data: NewReflectionData, clock: &impl Clock) -> Self {
        Self {
            id: ReflectionId::new(),
            user: data.user,
            week_start: data.week_start,
            summary: data.summary,
            energy: data.energy,
            tasks_completed: data.tasks_completed,
            tasks_scheduled: data.tasks_scheduled,
            focus_goals: data.focus_goals,
            prompt_hash: data.prompt_hash,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a reflection from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedReflectionData) -> Self {
        Self {
            id: data.id,
            user: data.user,
            week_start: data.week_start,
            summary: data.summary,
            energy: data.energy,
            tasks_completed: data.tasks_completed,
            tasks_scheduled: data.tasks_scheduled,
            focus_goals: data.focus_goals,
            prompt_hash: data.prompt_hash,
            created_at: data.created_at,
        }
    }

    /// Returns the reflection identifier.
    #[must_use]
    pub const fn id(&self) -> ReflectionId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user(&self) -> UserId {
        self.user
    }

    /// Returns the Monday opening the reflected week.
    #[must_use]
    pub const fn week_start(&self) -> DueDate {
        self.week_start
    }

    /// Returns the reflection body.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the self-reported energy, absent on generated reflections.
    #[must_use]
    pub const fn energy(&self) -> Option<EnergyRating> {
        self.energy
    }

    /// Returns the completed-task count.
    #[must_use]
    pub const fn tasks_completed(&self) -> u32 {
        self.tasks_completed
    }

    /// Returns the scheduled-task count.
    #[must_use]
    pub const fn tasks_scheduled(&self) -> u32 {
        self.tasks_scheduled
    }

    /// Returns the forward-looking focus goals.
    #[must_use]
    pub fn focus_goals(&self) -> &[String] {
        &self.focus_goals
    }

    /// Returns the generation prompt hash, if the reflection was
    /// generated.
    #[must_use]
    pub fn prompt_hash(&self) -> Option<&str> {
        self.prompt_hash.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
