//! `PostgreSQL` task repository.

use super::{
    blocking::{PlannerPgPool, run_blocking},
    models::{TaskRow, row_to_task, task_to_changeset, task_to_new_row},
    schema::tasks,
};
use crate::planner::{
    domain::{DueDate, GoalId, Task, TaskId, UserId},
    ports::{PlannerRepositoryError, PlannerRepositoryResult, TaskRepository},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PlannerPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PlannerPgPool) -> Self {
        Self { pool }
    }
}

/// Maps a unique violation on insert to a duplicate-task error.
fn map_insert_error(err: DieselError, id: TaskId) -> PlannerRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            PlannerRepositoryError::DuplicateTask(id)
        }
        _ => PlannerRepositoryError::persistence(err),
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> PlannerRepositoryResult<()> {
        let task_id = task.id();
        let new_row = task_to_new_row(task)?;
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| map_insert_error(err, task_id))?;
            Ok(())
        })
        .await
    }

    async fn insert_batch(&self, batch: &[Task]) -> PlannerRepositoryResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let first_id = batch.first().map_or_else(TaskId::new, Task::id);
        let new_rows = batch
            .iter()
            .map(task_to_new_row)
            .collect::<PlannerRepositoryResult<Vec<_>>>()?;
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_rows)
                .execute(connection)
                .map_err(|err| map_insert_error(err, first_id))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> PlannerRepositoryResult<()> {
        let task_id = task.id();
        let user = task.user();
        let changeset = task_to_changeset(task)?;
        run_blocking(&self.pool, move |connection| {
            let touched = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::user_id.eq(user.into_inner())),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(PlannerRepositoryError::persistence)?;
            if touched == 0 {
                return Err(PlannerRepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn remove(&self, user: UserId, id: TaskId) -> PlannerRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let touched = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::user_id.eq(user.into_inner())),
            )
            .execute(connection)
            .map_err(PlannerRepositoryError::persistence)?;
            if touched == 0 {
                return Err(PlannerRepositoryError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, user: UserId, id: TaskId) -> PlannerRepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::user_id.eq(user.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(PlannerRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_for_user(&self, user: UserId) -> PlannerRepositoryResult<Vec<Task>> {
        run_blocking(&self.pool, move |connection| {
            let rows = tasks::table
                .filter(tasks::user_id.eq(user.into_inner()))
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(PlannerRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_scheduled_between(
        &self,
        user: UserId,
        from: DueDate,
        to: DueDate,
    ) -> PlannerRepositoryResult<Vec<Task>> {
        run_blocking(&self.pool, move |connection| {
            let rows = tasks::table
                .filter(tasks::user_id.eq(user.into_inner()))
                .filter(tasks::due_date.between(Some(from.as_naive()), Some(to.as_naive())))
                .order((tasks::due_date.asc(), tasks::created_at.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(PlannerRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn clear_goal(&self, user: UserId, goal: GoalId) -> PlannerRepositoryResult<u64> {
        run_blocking(&self.pool, move |connection| {
            let touched = diesel::update(
                tasks::table
                    .filter(tasks::user_id.eq(user.into_inner()))
                    .filter(tasks::goal_id.eq(Some(goal.into_inner()))),
            )
            .set(tasks::goal_id.eq(None::<uuid::Uuid>))
            .execute(connection)
            .map_err(PlannerRepositoryError::persistence)?;
            Ok(u64::try_from(touched).unwrap_or(u64::MAX))
        })
        .await
    }
}
