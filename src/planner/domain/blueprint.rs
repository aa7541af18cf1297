//! Blueprint aggregate root and recurrence selector.

use super::{BlueprintId, DurationMinutes, PlannerDomainError, Priority, Title, UserId};
use chrono::{DateTime, Utc, Weekday};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Recurrence selector for a blueprint.
///
/// Storage uses the historical numeric domain: 0-6 name a weekday with
/// 0 = Sunday, while 7, 8, and 9 are synthetic codes for every day,
/// Monday-Friday, and the weekend. A null code means the blueprint creates
/// an undated inbox task. The selector keeps those behaviours without the
/// magic numbers; the codes survive only at the storage boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DaySelector {
    /// A single weekday of the target week.
    On {
        /// The weekday to expand to.
        weekday: Weekday,
    },
    /// All seven days of the target week.
    EveryDay,
    /// Monday through Friday.
    Weekdays,
    /// Saturday and Sunday.
    Weekend,
    /// No date; the expanded instance stays in the inbox.
    Unscheduled,
}

impl DaySelector {
    /// Decodes the persisted day-of-week code.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerDomainError::InvalidDayCode`] when the code falls
    /// outside the recognised 0-9 domain.
    pub const fn from_code(code: Option<i16>) -> Result<Self, PlannerDomainError> {
        match code {
            None => Ok(Self::Unscheduled),
            Some(0) => Ok(Self::On { weekday: Weekday::Sun }),
            Some(1) => Ok(Self::On { weekday: Weekday::Mon }),
            Some(2) => Ok(Self::On { weekday: Weekday::Tue }),
            Some(3) => Ok(Self::On { weekday: Weekday::Wed }),
            Some(4) => Ok(Self::On { weekday: Weekday::Thu }),
            Some(5) => Ok(Self::On { weekday: Weekday::Fri }),
            Some(6) => Ok(Self::On { weekday: Weekday::Sat }),
            Some(7) => Ok(Self::EveryDay),
            Some(8) => Ok(Self::Weekdays),
            Some(9) => Ok(Self::Weekend),
            Some(other) => Err(PlannerDomainError::InvalidDayCode(other)),
        }
    }

    /// Returns the persisted day-of-week code.
    #[must_use]
    pub const fn code(self) -> Option<i16> {
        match self {
            Self::On { weekday } => Some(match weekday {
                Weekday::Sun => 0,
                Weekday::Mon => 1,
                Weekday::Tue => 2,
                Weekday::Wed => 3,
                Weekday::Thu => 4,
                Weekday::Fri => 5,
                Weekday::Sat => 6,
            }),
            Self::EveryDay => Some(7),
            Self::Weekdays => Some(8),
            Self::Weekend => Some(9),
            Self::Unscheduled => None,
        }
    }

    /// Resolves the selector to Monday-based day offsets within the target
    /// week, or `None` for an undated instance.
    ///
    /// Monday maps to offset 0 and Sunday to offset 6, so a selector
    /// stored under the 0 = Sunday numbering lands at the far end of the
    /// week.
    #[must_use]
    pub fn week_offsets(self) -> Option<Vec<u8>> {
        match self {
            Self::On { weekday } => Some(vec![offset_from_monday(weekday)]),
            Self::EveryDay => Some((0..7).collect()),
            Self::Weekdays => Some((0..5).collect()),
            Self::Weekend => Some(vec![5, 6]),
            Self::Unscheduled => None,
        }
    }
}

/// Returns the Monday-based offset of a weekday.
const fn offset_from_monday(weekday: Weekday) -> u8 {
    match weekday {
        Weekday::Mon => 0,
        Weekday::Tue => 1,
        Weekday::Wed => 2,
        Weekday::Thu => 3,
        Weekday::Fri => 4,
        Weekday::Sat => 5,
        Weekday::Sun => 6,
    }
}

/// Recurring task definition expanded into dated instances on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    id: BlueprintId,
    user: UserId,
    title: Title,
    day: DaySelector,
    duration: DurationMinutes,
    priority: Priority,
    created_at: DateTime<Utc>,
}

/// Parameter object for creating a new blueprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlueprintData {
    /// Owning user.
    pub user: UserId,
    /// Template title copied onto expanded instances.
    pub title: Title,
    /// Recurrence selector.
    pub day: DaySelector,
    /// Duration copied onto expanded instances.
    pub duration: DurationMinutes,
    /// Priority copied onto expanded instances.
    pub priority: Priority,
}

/// Parameter object for reconstructing a persisted blueprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBlueprintData {
    /// Persisted blueprint identifier.
    pub id: BlueprintId,
    /// Persisted owning user.
    pub user: UserId,
    /// Persisted title.
    pub title: Title,
    /// Persisted recurrence selector.
    pub day: DaySelector,
    /// Persisted duration.
    pub duration: DurationMinutes,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Blueprint {
    /// Creates a new blueprint.
    #[must_use]
    pub fn new(data: NewBlueprintData, clock: &impl Clock) -> Self {
        Self {
            id: BlueprintId::new(),
            user: data.user,
            title: data.title,
            day: data.day,
            duration: data.duration,
            priority: data.priority,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a blueprint from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBlueprintData) -> Self {
        Self {
            id: data.id,
            user: data.user,
            title: data.title,
            day: data.day,
            duration: data.duration,
            priority: data.priority,
            created_at: data.created_at,
        }
    }

    /// Returns the blueprint identifier.
    #[must_use]
    pub const fn id(&self) -> BlueprintId {
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

    /// Returns the recurrence selector.
    #[must_use]
    pub const fn day(&self) -> DaySelector {
        self.day
    }

    /// Returns the duration copied onto expanded instances.
    #[must_use]
    pub const fn duration(&self) -> DurationMinutes {
        self.duration
    }

    /// Returns the priority copied onto expanded instances.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
