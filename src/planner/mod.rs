//! Task, goal, and blueprint planning for Cadence.
//!
//! This module covers the planning half of the application: direct task
//! capture and editing, weekly goals, and recurring blueprints that expand
//! into concrete, dated task instances for a target week while suppressing
//! instances that already exist. The module follows hexagonal architecture:
//!
//! - Domain types and the expansion algorithm in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
