//! `PostgreSQL` reflection repository.

use super::{
    models::{ReflectionRow, reflection_to_new_row, row_to_reflection},
    schema::reflections,
};
use crate::insights::{
    domain::Reflection,
    ports::{InsightsRepositoryError, InsightsRepositoryResult, ReflectionRepository},
};
use crate::planner::domain::{DueDate, UserId};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by insights adapters.
pub type InsightsPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed reflection repository.
#[derive(Debug, Clone)]
pub struct PostgresReflectionRepository {
    pool: InsightsPgPool,
}

impl PostgresReflectionRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: InsightsPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> InsightsRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> InsightsRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let owned_pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = owned_pool
                .get()
                .map_err(InsightsRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(InsightsRepositoryError::persistence)?
    }
}

#[async_trait]
impl ReflectionRepository for PostgresReflectionRepository {
    async fn insert(&self, reflection: &Reflection) -> InsightsRepositoryResult<()> {
        let reflection_id = reflection.id();
        let new_row = reflection_to_new_row(reflection)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(reflections::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        InsightsRepositoryError::DuplicateReflection(reflection_id)
                    }
                    _ => InsightsRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_for_user(&self, user: UserId) -> InsightsRepositoryResult<Vec<Reflection>> {
        self.run_blocking(move |connection| {
            let rows = reflections::table
                .filter(reflections::user_id.eq(user.into_inner()))
                .order((
                    reflections::week_start.desc(),
                    reflections::created_at.desc(),
                ))
                .select(ReflectionRow::as_select())
                .load::<ReflectionRow>(connection)
                .map_err(InsightsRepositoryError::persistence)?;
            rows.into_iter().map(row_to_reflection).collect()
        })
        .await
    }

    async fn find_by_week_start(
        &self,
        user: UserId,
        week_start: DueDate,
    ) -> InsightsRepositoryResult<Option<Reflection>> {
        self.run_blocking(move |connection| {
            let row = reflections::table
                .filter(reflections::user_id.eq(user.into_inner()))
                .filter(reflections::week_start.eq(week_start.as_naive()))
                .order(reflections::created_at.desc())
                .select(ReflectionRow::as_select())
                .first::<ReflectionRow>(connection)
                .optional()
                .map_err(InsightsRepositoryError::persistence)?;
            row.map(row_to_reflection).transpose()
        })
        .await
    }
}
