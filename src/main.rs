use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use reading_recs::{
    config::Config,
    db::{create_redis_client, Cache},
    routes::{create_router, AppState},
    services::{
        providers::{
            anthropic::AnthropicClient, cached_search::CachedSearchService,
            google::GoogleSearchClient, SearchService, TextUnderstandingService,
        },
        RecommendationOptions,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reading_recs=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let text_service: Arc<dyn TextUnderstandingService> = Arc::new(AnthropicClient::new(
        config.anthropic_api_key.clone(),
        config.anthropic_api_url.clone(),
        config.anthropic_model.clone(),
        config.anthropic_max_tokens,
    ));

    let google: Arc<dyn SearchService> = Arc::new(GoogleSearchClient::new(
        config.google_api_key.clone(),
        config.google_search_engine_id.clone(),
        config.google_search_url.clone(),
    ));

    let (search_service, cache_writer) = match &config.redis_url {
        Some(redis_url) => {
            let (cache, handle) = Cache::new(create_redis_client(redis_url)?);
            tracing::info!(ttl = config.search_cache_ttl_secs, "Search cache enabled");
            let cached: Arc<dyn SearchService> = Arc::new(CachedSearchService::new(
                google,
                cache,
                config.search_cache_ttl_secs,
            ));
            (cached, Some(handle))
        }
        None => {
            tracing::info!("REDIS_URL not set, search cache disabled");
            (google, None)
        }
    };

    let options = RecommendationOptions {
        max_candidates: config.max_candidates,
        ai_blend: config.ai_blend,
    };
    tracing::info!(
        max_candidates = options.max_candidates,
        ai_blend = options.ai_blend,
        "Recommendation pipeline configured"
    );

    let state = Arc::new(AppState::new(
        text_service,
        search_service,
        options,
        config.request_timeout(),
    ));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_writer {
        handle.shutdown().await;
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
