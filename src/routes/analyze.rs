use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult, middleware::request_id::RequestId, models::ContentAnalysis,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Handler for the content analysis endpoint
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<AnalyzeRequest>,
) -> AppResult<Json<ContentAnalysis>> {
    tracing::info!(
        request_id = %request_id,
        has_title = request.title.is_some(),
        has_url = request.url.is_some(),
        "Processing analysis request"
    );

    let analysis = state
        .analyzer
        .analyze(request.title.as_deref(), request.url.as_deref())
        .await?;

    Ok(Json(analysis))
}
