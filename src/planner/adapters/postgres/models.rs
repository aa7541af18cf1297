//! Diesel row models and row-to-domain conversions for planner
//! persistence.

use super::schema::{blueprints, goals, tasks};
use crate::planner::{
    domain::{
        Blueprint, BlueprintId, DaySelector, DueDate, DurationMinutes, Goal, GoalId,
        PersistedBlueprintData, PersistedGoalData, PersistedTaskData, Priority, StartTime, Task,
        TaskId, Title, UserId,
    },
    ports::{PlannerRepositoryError, PlannerRepositoryResult},
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Optional goal link.
    pub goal_id: Option<uuid::Uuid>,
    /// Optional timeline start.
    pub start_time: Option<NaiveTime>,
    /// Estimated duration in minutes.
    pub duration_minutes: i32,
    /// Completion flag.
    pub completed: bool,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Priority label.
    pub priority: String,
    /// Accumulated actual minutes.
    pub actual_minutes: i32,
    /// Running-timer marker.
    pub timer_started_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Optional goal link.
    pub goal_id: Option<uuid::Uuid>,
    /// Optional timeline start.
    pub start_time: Option<NaiveTime>,
    /// Estimated duration in minutes.
    pub duration_minutes: i32,
    /// Completion flag.
    pub completed: bool,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Priority label.
    pub priority: String,
    /// Accumulated actual minutes.
    pub actual_minutes: i32,
    /// Running-timer marker.
    pub timer_started_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset model for task updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Title.
    pub title: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Optional goal link.
    pub goal_id: Option<uuid::Uuid>,
    /// Optional timeline start.
    pub start_time: Option<NaiveTime>,
    /// Estimated duration in minutes.
    pub duration_minutes: i32,
    /// Completion flag.
    pub completed: bool,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Priority label.
    pub priority: String,
    /// Accumulated actual minutes.
    pub actual_minutes: i32,
    /// Running-timer marker.
    pub timer_started_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for goal records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = goals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GoalRow {
    /// Goal identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for goal records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = goals)]
pub struct NewGoalRow {
    /// Goal identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for blueprint records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = blueprints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BlueprintRow {
    /// Blueprint identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Day-of-week code.
    pub day_of_week: Option<i16>,
    /// Duration in minutes.
    pub duration_minutes: i32,
    /// Priority label.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for blueprint records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = blueprints)]
pub struct NewBlueprintRow {
    /// Blueprint identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Day-of-week code.
    pub day_of_week: Option<i16>,
    /// Duration in minutes.
    pub duration_minutes: i32,
    /// Priority label.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Converts a validated minute count for storage.
fn minutes_to_column(minutes: u32) -> PlannerRepositoryResult<i32> {
    i32::try_from(minutes).map_err(PlannerRepositoryError::persistence)
}

/// Restores a stored minute count, rejecting negative values.
fn minutes_from_column(minutes: i32) -> PlannerRepositoryResult<u32> {
    u32::try_from(minutes).map_err(PlannerRepositoryError::persistence)
}

/// Builds the insert row for a task aggregate.
pub fn task_to_new_row(task: &Task) -> PlannerRepositoryResult<NewTaskRow> {
    let data = task.to_persisted();
    Ok(NewTaskRow {
        id: data.id.into_inner(),
        user_id: data.user.into_inner(),
        title: data.title.as_str().to_owned(),
        due_date: data.due_date.map(DueDate::as_naive),
        goal_id: data.goal.map(GoalId::into_inner),
        start_time: data.start_time.map(StartTime::as_naive),
        duration_minutes: minutes_to_column(data.duration.value())?,
        completed: data.completed,
        completed_at: data.completed_at,
        priority: data.priority.as_str().to_owned(),
        actual_minutes: minutes_to_column(data.actual_minutes)?,
        timer_started_at: data.timer_started_at,
        created_at: data.created_at,
        updated_at: data.updated_at,
    })
}

/// Builds the update changeset for a task aggregate.
pub fn task_to_changeset(task: &Task) -> PlannerRepositoryResult<TaskChangeset> {
    let data = task.to_persisted();
    Ok(TaskChangeset {
        title: data.title.as_str().to_owned(),
        due_date: data.due_date.map(DueDate::as_naive),
        goal_id: data.goal.map(GoalId::into_inner),
        start_time: data.start_time.map(StartTime::as_naive),
        duration_minutes: minutes_to_column(data.duration.value())?,
        completed: data.completed,
        completed_at: data.completed_at,
        priority: data.priority.as_str().to_owned(),
        actual_minutes: minutes_to_column(data.actual_minutes)?,
        timer_started_at: data.timer_started_at,
        updated_at: data.updated_at,
    })
}

/// Restores a task aggregate from a stored row.
pub fn row_to_task(row: TaskRow) -> PlannerRepositoryResult<Task> {
    let title = Title::new(row.title).map_err(PlannerRepositoryError::persistence)?;
    let priority = Priority::try_from(row.priority.as_str())
        .map_err(PlannerRepositoryError::persistence)?;
    let duration = DurationMinutes::new(minutes_from_column(row.duration_minutes)?)
        .map_err(PlannerRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        user: UserId::from_uuid(row.user_id),
        title,
        due_date: row.due_date.map(DueDate::from_naive),
        goal: row.goal_id.map(GoalId::from_uuid),
        start_time: row.start_time.map(StartTime::from_naive),
        duration,
        completed: row.completed,
        completed_at: row.completed_at,
        priority,
        actual_minutes: minutes_from_column(row.actual_minutes)?,
        timer_started_at: row.timer_started_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

/// Builds the insert row for a goal aggregate.
pub fn goal_to_new_row(goal: &Goal) -> NewGoalRow {
    NewGoalRow {
        id: goal.id().into_inner(),
        user_id: goal.user().into_inner(),
        title: goal.title().as_str().to_owned(),
        created_at: goal.created_at(),
        updated_at: goal.updated_at(),
    }
}

/// Restores a goal aggregate from a stored row.
pub fn row_to_goal(row: GoalRow) -> PlannerRepositoryResult<Goal> {
    let title = Title::new(row.title).map_err(PlannerRepositoryError::persistence)?;
    Ok(Goal::from_persisted(PersistedGoalData {
        id: GoalId::from_uuid(row.id),
        user: UserId::from_uuid(row.user_id),
        title,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

/// Builds the insert row for a blueprint aggregate.
pub fn blueprint_to_new_row(blueprint: &Blueprint) -> PlannerRepositoryResult<NewBlueprintRow> {
    Ok(NewBlueprintRow {
        id: blueprint.id().into_inner(),
        user_id: blueprint.user().into_inner(),
        title: blueprint.title().as_str().to_owned(),
        day_of_week: blueprint.day().code(),
        duration_minutes: minutes_to_column(blueprint.duration().value())?,
        priority: blueprint.priority().as_str().to_owned(),
        created_at: blueprint.created_at(),
    })
}

/// Restores a blueprint aggregate from a stored row.
pub fn row_to_blueprint(row: BlueprintRow) -> PlannerRepositoryResult<Blueprint> {
    let title = Title::new(row.title).map_err(PlannerRepositoryError::persistence)?;
    let priority = Priority::try_from(row.priority.as_str())
        .map_err(PlannerRepositoryError::persistence)?;
    let duration = DurationMinutes::new(minutes_from_column(row.duration_minutes)?)
        .map_err(PlannerRepositoryError::persistence)?;
    let day = DaySelector::from_code(row.day_of_week)
        .map_err(PlannerRepositoryError::persistence)?;

    Ok(Blueprint::from_persisted(PersistedBlueprintData {
        id: BlueprintId::from_uuid(row.id),
        user: UserId::from_uuid(row.user_id),
        title,
        day,
        duration,
        priority,
        created_at: row.created_at,
    }))
}
