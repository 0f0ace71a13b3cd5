pub mod json;
pub mod memory;

use async_trait::async_trait;
use crate::core::Paper;
use crate::error::Result;
use crate::query::PaperQuery;

pub use json::JsonFileSource;
pub use memory::MemorySource;

/// Trait for paper sources (catalog APIs, local corpora, fixtures)
///
/// A source returns a finite, fully materialized list of papers for a query.
/// Paging, retries and caching are the source's own business.
#[async_trait]
pub trait PaperSource: Send + Sync {
    /// Fetch papers matching the query
    async fn fetch(&self, query: &PaperQuery) -> Result<Vec<Paper>>;

    /// Get source name
    fn name(&self) -> &str;

    /// Check if source is available
    async fn is_available(&self) -> bool;
}
