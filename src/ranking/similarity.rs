#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::Paper;
use crate::ranking::text::preprocess;
use crate::ranking::{Metric, RankedPaper, Ranker};

/// Batches at least this large are scored on the rayon pool
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 256;

/// Token-overlap ranker over title + summary
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityRanker {
    metric: Metric,
}

impl SimilarityRanker {
    pub fn new(metric: Metric) -> Self {
        Self { metric }
    }

    /// Build from a metric identifier (unknown names fall back to cosine)
    pub fn from_name(name: &str) -> Self {
        Self::new(Metric::from_name(name))
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    #[inline]
    fn score_paper(&self, query_tokens: &[String], paper: &Paper) -> f64 {
        let doc_tokens = preprocess(&paper.comparison_text());
        self.metric.score_tokens(query_tokens, &doc_tokens)
    }

    fn score_sequential(&self, query_tokens: &[String], candidates: &[Paper]) -> Vec<f64> {
        candidates
            .iter()
            .map(|paper| self.score_paper(query_tokens, paper))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn score_all(&self, query_tokens: &[String], candidates: &[Paper]) -> Vec<f64> {
        if candidates.len() < PARALLEL_THRESHOLD {
            return self.score_sequential(query_tokens, candidates);
        }

        // Indexed collect keeps input order
        candidates
            .par_iter()
            .map(|paper| self.score_paper(query_tokens, paper))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn score_all(&self, query_tokens: &[String], candidates: &[Paper]) -> Vec<f64> {
        self.score_sequential(query_tokens, candidates)
    }
}

impl Ranker for SimilarityRanker {
    fn rank(&self, query: &str, candidates: &[Paper]) -> Vec<RankedPaper> {
        let query_tokens = preprocess(query);
        let scores = self.score_all(&query_tokens, candidates);

        let mut ranked: Vec<RankedPaper> = candidates
            .iter()
            .zip(scores)
            .map(|(paper, score)| RankedPaper::new(paper.clone(), score))
            .collect();

        // Stable: equal scores keep input order
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        tracing::debug!(
            "Ranked {} papers with {} (query tokens: {})",
            ranked.len(),
            self.metric,
            query_tokens.len()
        );

        ranked
    }

    fn name(&self) -> &str {
        self.metric.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn papers() -> Vec<Paper> {
        vec![
            Paper::new("1", "Quantum computing advances", "We survey quantum computing hardware."),
            Paper::new("2", "Braised short ribs", "Slow cooking beef with red wine."),
            Paper::new("3", "Decoherence studies", "Measured noise quantum behavior in superconducting circuits."),
        ]
    }

    #[test]
    fn test_similarity_ranker_orders_by_score() {
        let ranker = SimilarityRanker::new(Metric::Cosine);
        let ranked = ranker.rank("quantum computing noise", &papers());

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].paper.id, "1");
        assert_eq!(ranked[1].paper.id, "3");
        assert_eq!(ranked[2].paper.id, "2");
        assert!(ranked[0].score > ranked[1].score);
        assert_eq!(ranked[2].score, 0.0);
    }

    #[test]
    fn test_every_metric_ranks_relevant_paper_first() {
        for metric in Metric::ALL {
            let ranked = SimilarityRanker::new(metric).rank("quantum computing", &papers());
            assert_eq!(ranked[0].paper.id, "1", "{}", metric);
        }
    }

    #[test]
    fn test_rank_top_truncates() {
        let ranker = SimilarityRanker::new(Metric::Cosine);
        let top = ranker.rank_top("quantum computing noise", &papers(), Some(2));
        let ids: Vec<&str> = top.iter().map(|r| r.paper.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        assert_eq!(ranker.rank_top("quantum", &papers(), None).len(), 3);
        assert_eq!(ranker.rank_top("quantum", &papers(), Some(0)).len(), 3);
    }

    #[test]
    fn test_ranker_name() {
        assert_eq!(SimilarityRanker::new(Metric::WordFrequency).name(), "word_frequency");
        assert_eq!(SimilarityRanker::from_name("nope").metric(), Metric::Cosine);
        assert_eq!(SimilarityRanker::default().metric(), Metric::Cosine);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let candidates = vec![
            Paper::new("a", "Same words", ""),
            Paper::new("b", "", "same words"),
            Paper::new("c", "SAME, words!", ""),
        ];
        let ranked = SimilarityRanker::new(Metric::Jaccard).rank("same words", &candidates);
        let ids: Vec<&str> = ranked.iter().map(|r| r.paper.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(ranked.iter().all(|r| r.score == 1.0));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential_order() {
        let candidates: Vec<Paper> = (0..PARALLEL_THRESHOLD * 2)
            .map(|i| Paper::new(i.to_string(), format!("paper {} quantum", i % 7), "noise".repeat(i % 3)))
            .collect();

        let ranker = SimilarityRanker::new(Metric::Cosine);
        let parallel = ranker.rank("quantum noise", &candidates);

        let query_tokens = preprocess("quantum noise");
        let mut sequential: Vec<RankedPaper> = candidates
            .iter()
            .map(|p| RankedPaper::new(p.clone(), ranker.score_paper(&query_tokens, p)))
            .collect();
        sequential.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        assert_eq!(parallel, sequential);
    }
}
