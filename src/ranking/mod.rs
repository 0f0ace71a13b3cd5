pub mod metric;
pub mod similarity;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::core::Paper;

pub use metric::{cosine_similarity, jaccard_similarity, word_frequency_similarity, Metric};
pub use similarity::SimilarityRanker;
pub use text::preprocess;

/// Trait for ranking implementations
pub trait Ranker: Send + Sync {
    /// Rank candidates against query, return sorted by score (highest first)
    ///
    /// The sort is stable: candidates with equal scores keep their input order.
    fn rank(&self, query: &str, candidates: &[Paper]) -> Vec<RankedPaper>;

    /// Rank and keep the first `top_n` entries
    ///
    /// `None` or `Some(0)` keeps the full ranking.
    fn rank_top(&self, query: &str, candidates: &[Paper], top_n: Option<usize>) -> Vec<RankedPaper> {
        let mut ranked = self.rank(query, candidates);
        if let Some(n) = top_n.filter(|n| *n > 0) {
            ranked.truncate(n);
        }
        ranked
    }

    /// Get ranker name for logging
    fn name(&self) -> &str;
}

/// Paper with similarity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPaper {
    pub paper: Paper,
    pub score: f64,
}

impl RankedPaper {
    pub fn new(paper: Paper, score: f64) -> Self {
        Self { paper, score }
    }
}

/// Rank `papers` against `query` with the metric named `metric`
///
/// Unknown metric names fall back to cosine. Never fails: an empty paper list
/// gives an empty ranking and an empty query scores every paper 0.0.
pub fn rank(query: &str, papers: &[Paper], metric: &str, top_n: Option<usize>) -> Vec<RankedPaper> {
    SimilarityRanker::from_name(metric).rank_top(query, papers, top_n)
}
