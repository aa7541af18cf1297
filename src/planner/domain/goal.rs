//! Goal aggregate root.

use super::{GoalId, Title, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Weekly goal owned by a user.
///
/// Tasks reference at most one goal; deleting a goal detaches its tasks
/// rather than cascading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    id: GoalId,
    user: UserId,
    title: Title,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedGoalData {
    /// Persisted goal identifier.
    pub id: GoalId,
    /// Persisted owning user.
    pub user: UserId,
    /// Persisted title.
    pub title: Title,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Creates a new goal owned by the given user.
    #[must_use]
    pub fn new(user: UserId, title: Title, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: GoalId::new(),
            user,
            title,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a goal from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedGoalData) -> Self {
        Self {
            id: data.id,
            user: data.user,
            title: data.title,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the goal identifier.
    #[must_use]
    pub const fn id(&self) -> GoalId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user(&self) -> UserId {
        self.user
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the title.
    pub fn rename(&mut self, title: Title, clock: &impl Clock) {
        self.title = title;
        self.updated_at = clock.utc();
    }
}
