//! Canned summarizer for tests and offline operation.

use async_trait::async_trait;

use crate::insights::ports::{ReportSummarizer, SummarizerError};

/// Summarizer returning a fixed response, used where the external
/// text-generation collaborator is unavailable or undesirable.
#[derive(Debug, Clone)]
pub struct CannedSummarizer {
    response: String,
}

impl CannedSummarizer {
    /// Creates a summarizer that always answers with the given prose.
    #[must_use]
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl ReportSummarizer for CannedSummarizer {
    async fn summarize(&self, _prompt: &str) -> Result<String, SummarizerError> {
        Ok(self.response.clone())
    }
}
