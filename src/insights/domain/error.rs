//! Error types for insights domain validation.

use thiserror::Error;

/// Errors returned while constructing domain insights values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InsightsDomainError {
    /// The energy rating is outside the 1-5 scale.
    #[error("invalid energy rating {0}, expected 1 to 5")]
    InvalidEnergyRating(u8),
}
