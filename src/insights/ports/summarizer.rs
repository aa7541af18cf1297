//! Port for the external text-generation collaborator.

use async_trait::async_trait;
use thiserror::Error;

/// Turns a rendered report prompt into reflection prose.
///
/// The implementation is an opaque external collaborator; the crate owns
/// only the prompt it sends and the hash it stores.
#[async_trait]
pub trait ReportSummarizer: Send + Sync {
    /// Generates reflection prose from the rendered prompt.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizerError`] when the collaborator is unreachable or
    /// returns an unusable response.
    async fn summarize(&self, prompt: &str) -> Result<String, SummarizerError>;
}

/// Errors returned by summarizer implementations.
#[derive(Debug, Clone, Error)]
pub enum SummarizerError {
    /// The collaborator could not be reached.
    #[error("summarizer unavailable: {0}")]
    Unavailable(String),

    /// The collaborator answered with an unusable payload.
    #[error("summarizer response invalid: {0}")]
    InvalidResponse(String),
}
