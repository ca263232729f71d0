//! External capability abstractions
//!
//! The recommendation pipeline only talks to the outside world through these two
//! traits: one for structured text understanding (keyword extraction, content
//! analysis, relevance judgements) and one for web search. Concrete bindings live
//! in the submodules; tests bind them to mocks or fakes.
use crate::{
    error::AppResult,
    models::{QuerySpec, SearchHit, SearchOptions},
};

pub mod anthropic;
pub mod cached_search;
pub mod google;

/// Turns a prompt into a single structured JSON payload
///
/// Implementations must fail with `AppError::Extraction` when the service
/// answers with something that is not JSON.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TextUnderstandingService: Send + Sync {
    async fn analyze(&self, prompt: &str) -> AppResult<serde_json::Value>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Executes a category search against a web search provider
///
/// Zero results is `Ok(vec![])`; only transport and auth problems are errors.
/// Implementations translate the `QuerySpec` into their own query syntax.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SearchService: Send + Sync {
    async fn search(&self, query: &QuerySpec, options: &SearchOptions)
        -> AppResult<Vec<SearchHit>>;

    /// Provider name for logging and cache keys
    fn name(&self) -> &'static str;
}

/// Strips a markdown code fence some models wrap around JSON answers
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
