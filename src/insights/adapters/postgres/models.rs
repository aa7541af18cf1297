//! Diesel row models and conversions for reflection persistence.

use super::schema::reflections;
use crate::insights::{
    domain::{EnergyRating, PersistedReflectionData, Reflection, ReflectionId},
    ports::{InsightsRepositoryError, InsightsRepositoryResult},
};
use crate::planner::domain::{DueDate, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for reflection records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reflections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReflectionRow {
    /// Reflection identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Week start.
    pub week_start: NaiveDate,
    /// Reflection body.
    pub summary: String,
    /// Energy rating.
    pub energy: Option<i16>,
    /// Completed count.
    pub tasks_completed: i32,
    /// Scheduled count.
    pub tasks_scheduled: i32,
    /// Focus goals JSON payload.
    pub focus_goals: Value,
    /// Generation prompt hash.
    pub prompt_hash: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for reflection records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reflections)]
pub struct NewReflectionRow {
    /// Reflection identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Week start.
    pub week_start: NaiveDate,
    /// Reflection body.
    pub summary: String,
    /// Energy rating.
    pub energy: Option<i16>,
    /// Completed count.
    pub tasks_completed: i32,
    /// Scheduled count.
    pub tasks_scheduled: i32,
    /// Focus goals JSON payload.
    pub focus_goals: Value,
    /// Generation prompt hash.
    pub prompt_hash: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Converts a count for storage.
fn count_to_column(count: u32) -> InsightsRepositoryResult<i32> {
    i32::try_from(count).map_err(InsightsRepositoryError::persistence)
}

/// Restores a stored count, rejecting negative values.
fn count_from_column(count: i32) -> InsightsRepositoryResult<u32> {
    u32::try_from(count).map_err(InsightsRepositoryError::persistence)
}

/// Builds the insert row for a reflection aggregate.
pub fn reflection_to_new_row(reflection: &Reflection) -> InsightsRepositoryResult<NewReflectionRow> {
    let focus_goals = serde_json::to_value(reflection.focus_goals())
        .map_err(InsightsRepositoryError::persistence)?;
    let energy = reflection
        .energy()
        .map(|rating| i16::from(rating.value()));

    Ok(NewReflectionRow {
        id: reflection.id().into_inner(),
        user_id: reflection.user().into_inner(),
        week_start: reflection.week_start().as_naive(),
        summary: reflection.summary().to_owned(),
        energy,
        tasks_completed: count_to_column(reflection.tasks_completed())?,
        tasks_scheduled: count_to_column(reflection.tasks_scheduled())?,
        focus_goals,
        prompt_hash: reflection.prompt_hash().map(str::to_owned),
        created_at: reflection.created_at(),
    })
}

/// Restores a reflection aggregate from a stored row.
pub fn row_to_reflection(row: ReflectionRow) -> InsightsRepositoryResult<Reflection> {
    let energy = row
        .energy
        .map(|stored| {
            let value =
                u8::try_from(stored).map_err(InsightsRepositoryError::persistence)?;
            EnergyRating::new(value).map_err(InsightsRepositoryError::persistence)
        })
        .transpose()?;
    let focus_goals: Vec<String> =
        serde_json::from_value(row.focus_goals).map_err(InsightsRepositoryError::persistence)?;

    Ok(Reflection::from_persisted(PersistedReflectionData {
        id: ReflectionId::from_uuid(row.id),
        user: UserId::from_uuid(row.user_id),
        week_start: DueDate::from_naive(row.week_start),
        summary: row.summary,
        energy,
        tasks_completed: count_from_column(row.tasks_completed)?,
        tasks_scheduled: count_from_column(row.tasks_scheduled)?,
        focus_goals,
        prompt_hash: row.prompt_hash,
        created_at: row.created_at,
    }))
}
