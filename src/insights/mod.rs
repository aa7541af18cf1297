//! Productivity analytics and weekly reflections for Cadence.
//!
//! This module reduces a user's tasks over a week or month window into a
//! scored productivity report, and manages weekly reflections, including
//! AI-generated ones: the report's numbers are rendered into a prompt and
//! handed to an external text-generation collaborator through the
//! summarizer port. The module follows hexagonal architecture:
//!
//! - Report types and the aggregation algorithm in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
