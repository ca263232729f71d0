use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::{
    error::{AppError, AppResult},
    models::{
        Candidate, ContentCategory, KeywordSet, RecommendationResult, ScoredCandidate,
        SearchOptions,
    },
    services::{
        keywords::KeywordExtractor,
        providers::{SearchService, TextUnderstandingService},
        query_builder, ranking, scoring,
    },
};

/// Tuning knobs for an orchestrator
#[derive(Debug, Clone)]
pub struct RecommendationOptions {
    /// Raw candidates kept per category before scoring
    pub max_candidates: usize,
    /// Average mechanical scores with an AI judgement per category
    pub ai_blend: bool,
}

impl Default for RecommendationOptions {
    fn default() -> Self {
        Self {
            max_candidates: 10,
            ai_blend: false,
        }
    }
}

/// Category-partitioned recommendations plus per-category failure reasons
///
/// Every requested category has an entry in `recommendations`, possibly empty.
/// `failures` explains categories that were degraded to an empty list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecommendationSet {
    pub recommendations: BTreeMap<ContentCategory, Vec<RecommendationResult>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub failures: BTreeMap<ContentCategory, String>,
}

/// Runs keyword extraction once, then one search pipeline per category
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    extractor: KeywordExtractor,
    text_service: Arc<dyn TextUnderstandingService>,
    search_service: Arc<dyn SearchService>,
    options: RecommendationOptions,
}

/// Everything one category pipeline needs, cheap to clone into a task
#[derive(Clone)]
struct CategoryContext {
    search_service: Arc<dyn SearchService>,
    text_service: Option<Arc<dyn TextUnderstandingService>>,
    keywords: Arc<KeywordSet>,
    summary: Arc<str>,
    max_candidates: usize,
}

/// Aborts still-running category tasks when dropped
///
/// Dropping the orchestration future (for instance on an upstream timeout)
/// drops this guard, so no search keeps running for a caller that is gone.
struct CategoryTasks(Vec<(ContentCategory, JoinHandle<AppResult<Vec<ScoredCandidate>>>)>);

impl Drop for CategoryTasks {
    fn drop(&mut self) {
        for (_, handle) in &self.0 {
            handle.abort();
        }
    }
}

impl RecommendationOrchestrator {
    pub fn new(
        text_service: Arc<dyn TextUnderstandingService>,
        search_service: Arc<dyn SearchService>,
        options: RecommendationOptions,
    ) -> Self {
        Self {
            extractor: KeywordExtractor::new(text_service.clone()),
            text_service,
            search_service,
            options,
        }
    }

    /// Recommendations for a single category
    ///
    /// Unlike `find_all_similar_content`, search failures are returned as
    /// errors. A category with no main topics yields an empty list.
    pub async fn find_similar_content(
        &self,
        summary: &str,
        category: ContentCategory,
    ) -> AppResult<Vec<RecommendationResult>> {
        let keywords = self.extractor.extract(summary).await?;
        let context = self.context(summary, keywords);
        recommend_for_category(context, category).await
    }

    /// Recommendations for every requested category
    ///
    /// Only empty input or a failed keyword extraction fail the whole call.
    /// Each category's search runs as its own task; a failing category is
    /// reported in `failures` and mapped to an empty list.
    pub async fn find_all_similar_content(
        &self,
        summary: &str,
        categories: &[ContentCategory],
    ) -> AppResult<RecommendationSet> {
        let categories = dedupe_categories(categories);
        let keywords = self.extractor.extract(summary).await?;
        let context = self.context(summary, keywords);

        let mut tasks = CategoryTasks(Vec::with_capacity(categories.len()));
        for category in &categories {
            let context = context.clone();
            let category = *category;
            let task = tokio::spawn(async move { recommend_for_category(context, category).await });
            tasks.0.push((category, task));
        }

        let mut set = RecommendationSet::default();
        for (category, task) in tasks.0.iter_mut() {
            let outcome = match task.await {
                Ok(result) => result,
                Err(e) => Err(AppError::Internal(format!("category task failed: {}", e))),
            };

            let results = match outcome {
                Ok(results) => results,
                Err(e) => {
                    tracing::warn!(
                        category = %category,
                        error = %e,
                        "Category degraded to empty results"
                    );
                    set.failures.insert(*category, e.to_string());
                    Vec::new()
                }
            };
            set.recommendations.insert(*category, results);
        }

        tracing::info!(
            categories = categories.len(),
            failed = set.failures.len(),
            total_results = set.recommendations.values().map(Vec::len).sum::<usize>(),
            "Recommendations assembled"
        );

        Ok(set)
    }

    fn context(&self, summary: &str, keywords: KeywordSet) -> CategoryContext {
        CategoryContext {
            search_service: self.search_service.clone(),
            text_service: self
                .options
                .ai_blend
                .then(|| self.text_service.clone()),
            keywords: Arc::new(keywords),
            summary: Arc::from(summary.trim()),
            max_candidates: self.options.max_candidates,
        }
    }
}

fn dedupe_categories(categories: &[ContentCategory]) -> Vec<ContentCategory> {
    if categories.is_empty() {
        return ContentCategory::DEFAULTS.to_vec();
    }

    let mut unique = Vec::with_capacity(categories.len());
    for category in categories {
        if !unique.contains(category) {
            unique.push(*category);
        }
    }
    unique
}

/// Build, search, score and rank for one category
async fn recommend_for_category(
    context: CategoryContext,
    category: ContentCategory,
) -> AppResult<Vec<ScoredCandidate>> {
    let query = match query_builder::build(&context.keywords, category) {
        Ok(query) => query,
        Err(e) => {
            tracing::info!(category = %category, reason = %e, "Skipping category");
            return Ok(Vec::new());
        }
    };

    let options = SearchOptions {
        category,
        limit: context.max_candidates,
    };
    let hits = context.search_service.search(&query, &options).await?;

    let candidates: Vec<Candidate> = hits
        .into_iter()
        .take(context.max_candidates)
        .filter_map(|hit| match Candidate::from_hit(hit) {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                tracing::debug!(category = %category, error = %e, "Dropping candidate");
                None
            }
        })
        .collect();

    for candidate in &candidates {
        let inferred = ContentCategory::infer_from_link(&candidate.link);
        if matches!(category, ContentCategory::Video | ContentCategory::Book) && inferred != category
        {
            tracing::debug!(
                category = %category,
                inferred = %inferred,
                link = %candidate.link,
                "Candidate host does not look like its category"
            );
        }
    }

    let mut scores: Vec<f64> = candidates
        .iter()
        .map(|candidate| scoring::score(candidate, &context.keywords))
        .collect();

    if let Some(text_service) = &context.text_service {
        if !candidates.is_empty() {
            scores = blend_with_judgements(text_service.as_ref(), &context, &candidates, scores)
                .await;
        }
    }

    let scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .zip(scores)
        .map(|(candidate, relevance_score)| ScoredCandidate {
            candidate,
            category,
            relevance_score,
        })
        .collect();

    let ranked = ranking::rank(scored);

    tracing::info!(
        category = %category,
        results = ranked.len(),
        provider = context.search_service.name(),
        "Category recommendations ranked"
    );

    Ok(ranked)
}

/// Averages mechanical scores with AI judgements, keeping them on any failure
async fn blend_with_judgements(
    text_service: &dyn TextUnderstandingService,
    context: &CategoryContext,
    candidates: &[Candidate],
    mechanical: Vec<f64>,
) -> Vec<f64> {
    let prompt = scoring::judgement_prompt(&context.summary, candidates);
    let judged = match text_service.analyze(&prompt).await {
        Ok(payload) => scoring::parse_judgements(payload, candidates.len()),
        Err(e) => Err(e),
    };

    match judged {
        Ok(judged) => mechanical
            .iter()
            .zip(judged)
            .map(|(m, j)| scoring::blend(*m, j))
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Relevance judgement failed, keeping mechanical scores");
            mechanical
        }
    }
}
