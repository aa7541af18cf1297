//! Connection pool plumbing shared by the planner `PostgreSQL` adapters.

use crate::planner::ports::{PlannerRepositoryError, PlannerRepositoryResult};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by planner adapters.
pub type PlannerPgPool = Pool<ConnectionManager<PgConnection>>;

/// Runs a blocking Diesel operation on the Tokio blocking pool.
pub(super) async fn run_blocking<F, T>(pool: &PlannerPgPool, f: F) -> PlannerRepositoryResult<T>
where
    F: FnOnce(&mut PgConnection) -> PlannerRepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let owned_pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = owned_pool
            .get()
            .map_err(PlannerRepositoryError::persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(PlannerRepositoryError::persistence)?
}
