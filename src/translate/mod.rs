use async_trait::async_trait;

use crate::core::TRANSLATION_FAILED;
use crate::error::Result;

/// Trait for summary translators (LLM endpoints, MT services)
#[async_trait]
pub trait Translator: Send + Sync {
    /// Produce a localized one-line summary of `summary`
    async fn translate(&self, summary: &str) -> Result<String>;

    /// Get translator name for logging
    fn name(&self) -> &str;
}

/// Translate `summary`, substituting the visible placeholder on failure
pub async fn translate_or_placeholder(translator: &dyn Translator, summary: &str) -> String {
    match translator.translate(summary).await {
        Ok(translated) => translated.trim().to_string(),
        Err(e) => {
            tracing::warn!("Translator {} failed: {}", translator.name(), e);
            format!("{}: {}", TRANSLATION_FAILED, e)
        }
    }
}
