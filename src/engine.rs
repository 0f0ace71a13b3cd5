use crate::core::{MatchEntry, MatchResponse, Paper, SAMPLE_TEXT};
use crate::error::{PaperMatchError, Result};
use crate::query::PaperQuery;
use crate::ranking::{Metric, Ranker, SimilarityRanker};
use crate::sources::PaperSource;
use crate::translate::{translate_or_placeholder, Translator};
use std::sync::Arc;
use std::time::Instant;

/// Main paper match orchestrator
pub struct PaperEngine {
    sources: Vec<Arc<dyn PaperSource>>,
    translator: Option<Arc<dyn Translator>>,
    options: MatchOptions,
}

/// Match request parameters
#[derive(Debug, Clone)]
pub struct MatchRequest {
    /// Free text the papers are ranked against
    pub text: String,
    /// Metric identifier; `None` uses the engine default
    pub metric: Option<String>,
    /// Entries to keep; `None` uses the engine default, `Some(0)` keeps all
    pub top_n: Option<usize>,
    /// Translate summaries; `None` uses the engine default. Has no effect
    /// unless the engine has a translator.
    pub translate: Option<bool>,
    /// Which papers the sources should return
    pub query: PaperQuery,
}

impl MatchRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metric: None,
            top_n: None,
            translate: None,
            query: PaperQuery::unfiltered(),
        }
    }

    /// Request over the built-in [`SAMPLE_TEXT`]
    pub fn sample() -> Self {
        Self::new(SAMPLE_TEXT)
    }

    pub fn with_metric(mut self, metric: impl Into<String>) -> Self {
        self.metric = Some(metric.into());
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    pub fn with_translate(mut self, translate: bool) -> Self {
        self.translate = Some(translate);
        self
    }

    pub fn with_query(mut self, query: PaperQuery) -> Self {
        self.query = query;
        self
    }
}

/// Engine options/configuration
#[derive(Debug, Clone)]
pub struct MatchOptions {
    pub default_metric: Metric,
    pub default_top_n: usize,
    pub translate: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            default_metric: Metric::Cosine,
            default_top_n: 10,
            translate: true,
        }
    }
}

impl Default for PaperEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PaperEngine {
    /// Create new engine with default options and no sources
    pub fn new() -> Self {
        Self::with_options(MatchOptions::default())
    }

    pub fn with_options(options: MatchOptions) -> Self {
        Self {
            sources: Vec::new(),
            translator: None,
            options,
        }
    }

    /// Add a paper source
    pub fn add_source(&mut self, source: Arc<dyn PaperSource>) {
        self.sources.push(source);
    }

    /// Set the summary translator
    pub fn set_translator(&mut self, translator: Arc<dyn Translator>) {
        self.translator = Some(translator);
    }

    pub fn has_translator(&self) -> bool {
        self.translator.is_some()
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Collect papers from every source
    ///
    /// Failing sources are skipped; the call fails only when every source
    /// failed.
    pub async fn fetch(&self, query: &PaperQuery) -> Result<Vec<Paper>> {
        let mut all_papers = Vec::new();
        let mut last_error: Option<PaperMatchError> = None;
        let mut succeeded = 0usize;

        for source in &self.sources {
            match source.fetch(query).await {
                Ok(mut papers) => {
                    tracing::debug!("Source {} returned {} papers", source.name(), papers.len());
                    succeeded += 1;
                    all_papers.append(&mut papers);
                }
                Err(e) => {
                    tracing::warn!("Source {} failed: {}", source.name(), e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if succeeded == 0 => Err(e),
            _ => Ok(all_papers),
        }
    }

    /// Fetch, rank and present papers for a request
    pub async fn match_papers(&self, request: MatchRequest) -> Result<MatchResponse> {
        let start = Instant::now();

        let metric = request
            .metric
            .as_deref()
            .map(Metric::from_name)
            .unwrap_or(self.options.default_metric);
        let top_n = request.top_n.unwrap_or(self.options.default_top_n);
        let translate = request.translate.unwrap_or(self.options.translate);

        let papers = self.fetch(&request.query).await?;

        let ranker = SimilarityRanker::new(metric);
        let ranked = ranker.rank_top(&request.text, &papers, Some(top_n));

        let mut entries = Vec::with_capacity(ranked.len());
        for (i, item) in ranked.iter().enumerate() {
            let entry = MatchEntry::from_ranked(i + 1, item);
            let entry = match (&self.translator, translate) {
                (Some(translator), true) => {
                    let translated = translate_or_placeholder(translator.as_ref(), &item.paper.summary).await;
                    entry.with_translation(translated)
                }
                _ => entry,
            };
            entries.push(entry);
        }

        let response = MatchResponse {
            query: request.text,
            metric,
            entries,
            total_candidates: papers.len(),
            latency_ms: start.elapsed().as_secs_f64() * 1000.0,
            ranking_method: ranker.name().to_string(),
        };

        tracing::info!("✅ {}", response.display());

        Ok(response)
    }
}
