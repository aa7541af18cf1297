//! `PostgreSQL` repository implementation for reflection persistence.

mod models;
mod repository;
mod schema;

pub use repository::{InsightsPgPool, PostgresReflectionRepository};
