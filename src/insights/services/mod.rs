//! Application services for insights orchestration.

mod error;
mod prompt;
mod reporting;

pub use error::{InsightsError, InsightsResult};
pub use reporting::{InsightsService, RecordReflectionRequest};
