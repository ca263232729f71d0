use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{KeywordSet, RawKeywords},
    services::providers::TextUnderstandingService,
};

/// Extracts a three-tier `KeywordSet` from free text
#[derive(Clone)]
pub struct KeywordExtractor {
    service: Arc<dyn TextUnderstandingService>,
}

impl KeywordExtractor {
    pub fn new(service: Arc<dyn TextUnderstandingService>) -> Self {
        Self { service }
    }

    /// Makes exactly one call to the text-understanding service
    ///
    /// Empty or whitespace-only text fails with `InvalidInput` before any call
    /// is made. Output missing a tier or with non-string terms is `Extraction`.
    pub async fn extract(&self, text: &str) -> AppResult<KeywordSet> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::InvalidInput(
                "Text to extract keywords from cannot be empty".to_string(),
            ));
        }

        let payload = self.service.analyze(&extraction_prompt(text)).await?;
        let keywords = parse_keywords(payload)?;

        tracing::info!(
            main_topics = keywords.main_topics().len(),
            specific_concepts = keywords.specific_concepts().len(),
            related_terms = keywords.related_terms().len(),
            provider = self.service.name(),
            "Keywords extracted"
        );

        Ok(keywords)
    }
}

fn extraction_prompt(text: &str) -> String {
    format!(
        "Analyze the text below and extract keywords in three groups:\n\
         - mainTopics: 3-5 key subjects\n\
         - specificConcepts: 4-6 technical or specific terms\n\
         - relatedTerms: 4-6 broader or related concepts\n\
         \n\
         Keep each term concise (1-3 words) and do not repeat a term in more than one group.\n\
         Respond with a JSON object whose keys are mainTopics, specificConcepts and \
         relatedTerms, each an array of strings.\n\
         \n\
         Text: {}",
        text
    )
}

pub(crate) fn parse_keywords(payload: serde_json::Value) -> AppResult<KeywordSet> {
    serde_json::from_value::<RawKeywords>(payload)
        .map(KeywordSet::from)
        .map_err(|e| AppError::Extraction(format!("unexpected keyword shape: {}", e)))
}
