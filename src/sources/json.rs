use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::Paper;
use crate::error::{PaperMatchError, Result};
use crate::query::PaperQuery;
use crate::sources::PaperSource;

/// Corpus file layout: a bare array, or a fetched batch with `entries`
#[derive(Deserialize)]
#[serde(untagged)]
enum CorpusFile {
    List(Vec<Paper>),
    Batch {
        #[serde(default)]
        #[allow(dead_code)]
        total_results: usize,
        entries: Vec<Paper>,
    },
}

impl CorpusFile {
    fn into_papers(self) -> Vec<Paper> {
        match self {
            CorpusFile::List(papers) => papers,
            CorpusFile::Batch { entries, .. } => entries,
        }
    }
}

/// Paper corpus stored as a JSON file
///
/// The file is re-read on every fetch so an updated export is picked up
/// without restarting.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create new JSON file source
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn source_error(&self, message: String) -> PaperMatchError {
        PaperMatchError::Source {
            source_name: "json".to_string(),
            message,
        }
    }

    /// Load every paper in the file
    pub async fn load(&self) -> Result<Vec<Paper>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.source_error(format!("Failed to read {}: {}", self.path.display(), e)))?;

        let corpus: CorpusFile = serde_json::from_str(&raw)
            .map_err(|e| self.source_error(format!("Invalid JSON in {}: {}", self.path.display(), e)))?;

        Ok(corpus.into_papers())
    }
}

#[async_trait]
impl PaperSource for JsonFileSource {
    async fn fetch(&self, query: &PaperQuery) -> Result<Vec<Paper>> {
        let papers = self.load().await?;
        let selected = query.select(&papers);

        tracing::debug!(
            "JSON corpus {} → {}/{} papers",
            self.path.display(),
            selected.len(),
            papers.len()
        );

        Ok(selected)
    }

    fn name(&self) -> &str {
        "json"
    }

    async fn is_available(&self) -> bool {
        tokio::fs::metadata(&self.path).await.is_ok()
    }
}
