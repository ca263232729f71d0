use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};
use crate::services::{
    providers::{SearchService, TextUnderstandingService},
    ContentAnalyzer, RecommendationOptions, RecommendationOrchestrator,
};

pub mod analyze;
pub mod recommendations;

/// Shared handler state: injected service handles, no global clients
pub struct AppState {
    pub orchestrator: RecommendationOrchestrator,
    pub analyzer: ContentAnalyzer,
    /// Upper bound for one recommendation call
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        text_service: Arc<dyn TextUnderstandingService>,
        search_service: Arc<dyn SearchService>,
        options: RecommendationOptions,
        request_timeout: Duration,
    ) -> Self {
        Self {
            orchestrator: RecommendationOrchestrator::new(
                text_service.clone(),
                search_service,
                options,
            ),
            analyzer: ContentAnalyzer::new(text_service),
            request_timeout,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommendations", post(recommendations::recommend))
        .route("/analyze", post(analyze::analyze))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
