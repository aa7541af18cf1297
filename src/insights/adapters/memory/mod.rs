//! In-memory adapters for insights tests and reference behaviour.

mod reflection;
mod summarizer;

pub use reflection::InMemoryReflectionRepository;
pub use summarizer::CannedSummarizer;
