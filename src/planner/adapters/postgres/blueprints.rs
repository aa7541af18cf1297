//! `PostgreSQL` blueprint repository.

use super::{
    blocking::{PlannerPgPool, run_blocking},
    models::{BlueprintRow, blueprint_to_new_row, row_to_blueprint},
    schema::blueprints,
};
use crate::planner::{
    domain::{Blueprint, BlueprintId, UserId},
    ports::{BlueprintRepository, PlannerRepositoryError, PlannerRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed blueprint repository.
#[derive(Debug, Clone)]
pub struct PostgresBlueprintRepository {
    pool: PlannerPgPool,
}

impl PostgresBlueprintRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PlannerPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlueprintRepository for PostgresBlueprintRepository {
    async fn insert(&self, blueprint: &Blueprint) -> PlannerRepositoryResult<()> {
        let blueprint_id = blueprint.id();
        let new_row = blueprint_to_new_row(blueprint)?;
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(blueprints::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        PlannerRepositoryError::DuplicateBlueprint(blueprint_id)
                    }
                    _ => PlannerRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn remove(&self, user: UserId, id: BlueprintId) -> PlannerRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let touched = diesel::delete(
                blueprints::table
                    .filter(blueprints::id.eq(id.into_inner()))
                    .filter(blueprints::user_id.eq(user.into_inner())),
            )
            .execute(connection)
            .map_err(PlannerRepositoryError::persistence)?;
            if touched == 0 {
                return Err(PlannerRepositoryError::BlueprintNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn list_for_user(&self, user: UserId) -> PlannerRepositoryResult<Vec<Blueprint>> {
        run_blocking(&self.pool, move |connection| {
            let rows = blueprints::table
                .filter(blueprints::user_id.eq(user.into_inner()))
                .order(blueprints::created_at.asc())
                .select(BlueprintRow::as_select())
                .load::<BlueprintRow>(connection)
                .map_err(PlannerRepositoryError::persistence)?;
            rows.into_iter().map(row_to_blueprint).collect()
        })
        .await
    }
}
