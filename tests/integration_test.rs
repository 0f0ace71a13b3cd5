use async_trait::async_trait;
use paper_match::{
    error::PaperMatchError, sources::JsonFileSource, MatchRequest, PaperEngine, QueryBuilder,
    Translator,
};
use std::sync::Arc;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/papers.json");

const FLOOD_QUERY: &str = "Detection of flooded areas using multi-modal radar images";

/// Fails on summaries mentioning radar, echoes the first word otherwise
struct PickyTranslator;

#[async_trait]
impl Translator for PickyTranslator {
    async fn translate(&self, summary: &str) -> paper_match::Result<String> {
        if summary.contains("radar") {
            Err(PaperMatchError::Translation("quota exceeded".to_string()))
        } else {
            Ok(summary.split_whitespace().next().unwrap_or_default().to_string())
        }
    }

    fn name(&self) -> &str {
        "picky"
    }
}

fn engine() -> PaperEngine {
    let mut engine = PaperEngine::new();
    engine.add_source(Arc::new(JsonFileSource::new(FIXTURE)));
    engine
}

#[tokio::test]
async fn test_engine_ranks_fixture_corpus() {
    let response = engine()
        .match_papers(MatchRequest::new(FLOOD_QUERY).with_top_n(2))
        .await
        .unwrap();

    assert_eq!(response.total_candidates, 4);
    assert_eq!(response.entries.len(), 2);
    assert_eq!(response.entries[0].arxiv_id, "2401.00101");
    assert_eq!(response.entries[1].arxiv_id, "2401.00303");
    assert_eq!(response.entries[0].rank, 1);
    assert_eq!(response.entries[0].authors, "Ada Lovelace, Alan Turing");
    assert!(response.entries[0].similarity_score > response.entries[1].similarity_score);
    assert!(response.entries[0].translated_summary.is_none());
}

#[tokio::test]
async fn test_all_metrics_agree_on_best_match() {
    for metric in ["jaccard", "cosine", "word_frequency"] {
        let response = engine()
            .match_papers(MatchRequest::new(FLOOD_QUERY).with_metric(metric).with_top_n(1))
            .await
            .unwrap();
        assert_eq!(response.ranking_method, metric);
        assert_eq!(response.entries[0].arxiv_id, "2401.00101", "{}", metric);
    }
}

#[tokio::test]
async fn test_translation_failures_do_not_affect_ranking() {
    let plain = engine()
        .match_papers(MatchRequest::new(FLOOD_QUERY).with_top_n(0))
        .await
        .unwrap();

    let mut translated_engine = engine();
    translated_engine.set_translator(Arc::new(PickyTranslator));
    let translated = translated_engine
        .match_papers(MatchRequest::new(FLOOD_QUERY).with_top_n(0))
        .await
        .unwrap();

    let plain_ids: Vec<&str> = plain.entries.iter().map(|e| e.id.as_str()).collect();
    let translated_ids: Vec<&str> = translated.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(plain_ids, translated_ids);
    assert_eq!(translated.entries.len(), 4);

    for entry in &translated.entries {
        let text = entry.translated_summary.as_deref().unwrap();
        if entry.summary.contains("radar") {
            assert_eq!(text, "translation failed: Translation error: quota exceeded");
        } else {
            assert!(!text.starts_with("translation failed"));
        }
    }
}

#[tokio::test]
async fn test_query_filters_applied_before_ranking() {
    let query = QueryBuilder::new().categories(["cs.AI"]).build_local();
    let response = engine()
        .match_papers(MatchRequest::new(FLOOD_QUERY).with_query(query))
        .await
        .unwrap();

    assert_eq!(response.total_candidates, 1);
    assert_eq!(response.entries[0].title, "Planning with Language Models");
    assert_eq!(response.entries[0].similarity_score, 0.0);
}

#[tokio::test]
async fn test_empty_text_keeps_corpus_order() {
    let response = engine()
        .match_papers(MatchRequest::new("").with_top_n(0))
        .await
        .unwrap();

    let ids: Vec<&str> = response.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "http://arxiv.org/abs/2401.00101v1",
            "http://arxiv.org/abs/2401.00202v2",
            "http://arxiv.org/abs/2401.00303v1",
            "",
        ]
    );
    assert!(response.entries.iter().all(|e| e.similarity_score == 0.0));
}

#[tokio::test]
async fn test_missing_corpus_is_error() {
    let mut engine = PaperEngine::new();
    engine.add_source(Arc::new(JsonFileSource::new("/nonexistent/papers.json")));

    let result = engine.match_papers(MatchRequest::new(FLOOD_QUERY)).await;
    assert!(matches!(result, Err(PaperMatchError::Source { .. })));
}
