//! `PostgreSQL` goal repository.

use super::{
    blocking::{PlannerPgPool, run_blocking},
    models::{GoalRow, goal_to_new_row, row_to_goal},
    schema::goals,
};
use crate::planner::{
    domain::{Goal, GoalId, UserId},
    ports::{GoalRepository, PlannerRepositoryError, PlannerRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed goal repository.
#[derive(Debug, Clone)]
pub struct PostgresGoalRepository {
    pool: PlannerPgPool,
}

impl PostgresGoalRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PlannerPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GoalRepository for PostgresGoalRepository {
    async fn insert(&self, goal: &Goal) -> PlannerRepositoryResult<()> {
        let goal_id = goal.id();
        let new_row = goal_to_new_row(goal);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(goals::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        PlannerRepositoryError::DuplicateGoal(goal_id)
                    }
                    _ => PlannerRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, goal: &Goal) -> PlannerRepositoryResult<()> {
        let goal_id = goal.id();
        let user = goal.user();
        let title = goal.title().as_str().to_owned();
        let updated_at = goal.updated_at();
        run_blocking(&self.pool, move |connection| {
            let touched = diesel::update(
                goals::table
                    .filter(goals::id.eq(goal_id.into_inner()))
                    .filter(goals::user_id.eq(user.into_inner())),
            )
            .set((goals::title.eq(title), goals::updated_at.eq(updated_at)))
            .execute(connection)
            .map_err(PlannerRepositoryError::persistence)?;
            if touched == 0 {
                return Err(PlannerRepositoryError::GoalNotFound(goal_id));
            }
            Ok(())
        })
        .await
    }

    async fn remove(&self, user: UserId, id: GoalId) -> PlannerRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let touched = diesel::delete(
                goals::table
                    .filter(goals::id.eq(id.into_inner()))
                    .filter(goals::user_id.eq(user.into_inner())),
            )
            .execute(connection)
            .map_err(PlannerRepositoryError::persistence)?;
            if touched == 0 {
                return Err(PlannerRepositoryError::GoalNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, user: UserId, id: GoalId) -> PlannerRepositoryResult<Option<Goal>> {
        run_blocking(&self.pool, move |connection| {
            let row = goals::table
                .filter(goals::id.eq(id.into_inner()))
                .filter(goals::user_id.eq(user.into_inner()))
                .select(GoalRow::as_select())
                .first::<GoalRow>(connection)
                .optional()
                .map_err(PlannerRepositoryError::persistence)?;
            row.map(row_to_goal).transpose()
        })
        .await
    }

    async fn list_for_user(&self, user: UserId) -> PlannerRepositoryResult<Vec<Goal>> {
        run_blocking(&self.pool, move |connection| {
            let rows = goals::table
                .filter(goals::user_id.eq(user.into_inner()))
                .order(goals::created_at.asc())
                .select(GoalRow::as_select())
                .load::<GoalRow>(connection)
                .map_err(PlannerRepositoryError::persistence)?;
            rows.into_iter().map(row_to_goal).collect()
        })
        .await
    }
}
