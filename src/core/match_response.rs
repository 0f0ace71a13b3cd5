use serde::{Deserialize, Serialize};

use crate::ranking::{Metric, RankedPaper};

/// Placeholder prefix used when a summary could not be translated
pub const TRANSLATION_FAILED: &str = "translation failed";

/// One ranked paper, flattened for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEntry {
    /// 1-based position in the ranking
    pub rank: usize,

    /// Similarity score rounded to 4 decimals
    pub similarity_score: f64,

    pub title: String,

    /// Author names joined by ", "
    pub authors: String,

    pub published: String,

    /// Category ids joined by ", "
    pub categories: String,

    pub summary: String,

    /// Localized one-line summary, or a failure placeholder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_summary: Option<String>,

    pub arxiv_id: String,

    pub id: String,
}

impl MatchEntry {
    /// Build an entry from a ranked paper at 1-based `rank`
    pub fn from_ranked(rank: usize, ranked: &RankedPaper) -> Self {
        let paper = &ranked.paper;
        Self {
            rank,
            similarity_score: round_score(ranked.score),
            title: paper.title.clone(),
            authors: paper.authors.join(", "),
            published: paper.published.clone(),
            categories: paper.categories.join(", "),
            summary: paper.summary.clone(),
            translated_summary: None,
            arxiv_id: paper.resolved_arxiv_id(),
            id: paper.id.clone(),
        }
    }

    /// Attach a translated summary
    pub fn with_translation(mut self, translated: impl Into<String>) -> Self {
        self.translated_summary = Some(translated.into());
        self
    }
}

/// Match response with ranked entries and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    /// Query text the papers were ranked against
    pub query: String,

    /// Metric actually used (after fallback)
    pub metric: Metric,

    /// Ranked entries, best first
    #[serde(default)]
    pub entries: Vec<MatchEntry>,

    /// Number of papers fetched before truncation
    pub total_candidates: usize,

    /// Match latency in milliseconds
    pub latency_ms: f64,

    /// Ranker that produced the ordering
    pub ranking_method: String,
}

impl MatchResponse {
    /// Create an empty response for `query`
    pub fn new(query: impl Into<String>, metric: Metric) -> Self {
        Self {
            query: query.into(),
            metric,
            entries: Vec::new(),
            total_candidates: 0,
            latency_ms: 0.0,
            ranking_method: metric.as_str().to_string(),
        }
    }

    /// Best entry, if any
    pub fn best(&self) -> Option<&MatchEntry> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get display string for logging
    pub fn display(&self) -> String {
        match self.best() {
            Some(best) => format!(
                "{} - {:.4} [{}] {}/{} in {:.2}ms",
                best.title,
                best.similarity_score,
                self.ranking_method,
                self.entries.len(),
                self.total_candidates,
                self.latency_ms
            ),
            None => format!("no matches [{}] in {:.2}ms", self.ranking_method, self.latency_ms),
        }
    }
}

fn round_score(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}
