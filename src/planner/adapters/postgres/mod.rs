//! `PostgreSQL` repository implementations for planner persistence.

mod blocking;
mod blueprints;
mod goals;
mod models;
mod schema;
mod tasks;

pub use blocking::PlannerPgPool;
pub use blueprints::PostgresBlueprintRepository;
pub use goals::PostgresGoalRepository;
pub use tasks::PostgresTaskRepository;
