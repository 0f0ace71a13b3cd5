use async_trait::async_trait;

use crate::core::Paper;
use crate::error::Result;
use crate::query::PaperQuery;
use crate::sources::PaperSource;

/// Fixed in-memory paper list
pub struct MemorySource {
    name: String,
    papers: Vec<Paper>,
}

impl MemorySource {
    pub fn new(papers: Vec<Paper>) -> Self {
        Self::named("memory", papers)
    }

    pub fn named(name: impl Into<String>, papers: Vec<Paper>) -> Self {
        Self {
            name: name.into(),
            papers,
        }
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }
}

#[async_trait]
impl PaperSource for MemorySource {
    async fn fetch(&self, query: &PaperQuery) -> Result<Vec<Paper>> {
        Ok(query.select(&self.papers))
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn is_available(&self) -> bool {
        true
    }
}
