use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::ContentCategory,
    routes::AppState,
    services::RecommendationSet,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub summary: String,
    /// Defaults to book, article and video when omitted or empty
    #[serde(default)]
    pub categories: Vec<ContentCategory>,
}

/// Handler for the recommendations endpoint
///
/// Bounded by the configured request timeout; when it fires the orchestration
/// future is dropped, which aborts in-flight category searches.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationSet>> {
    tracing::info!(
        request_id = %request_id,
        summary_len = request.summary.len(),
        categories = ?request.categories,
        "Processing recommendation request"
    );

    let set = tokio::time::timeout(
        state.request_timeout,
        state
            .orchestrator
            .find_all_similar_content(&request.summary, &request.categories),
    )
    .await
    .map_err(|_| AppError::Timeout(state.request_timeout.as_secs()))??;

    tracing::info!(
        request_id = %request_id,
        failed_categories = set.failures.len(),
        "Recommendations completed"
    );

    Ok(Json(set))
}
