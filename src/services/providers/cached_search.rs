//! Redis read-through cache in front of any `SearchService`
//!
//! Identical category queries (same provider, same `QuerySpec`, same limit) are
//! served from Redis for the configured TTL instead of spending search quota.
use std::sync::Arc;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{QuerySpec, SearchHit, SearchOptions},
    services::providers::SearchService,
};

#[derive(Clone)]
pub struct CachedSearchService {
    inner: Arc<dyn SearchService>,
    cache: Cache,
    ttl: u64,
}

impl CachedSearchService {
    pub fn new(inner: Arc<dyn SearchService>, cache: Cache, ttl: u64) -> Self {
        Self { inner, cache, ttl }
    }

    fn cache_key(&self, query: &QuerySpec, options: &SearchOptions) -> AppResult<CacheKey> {
        let spec = serde_json::to_string(query)
            .map_err(|e| AppError::Internal(format!("Cache key serialization error: {}", e)))?;
        Ok(CacheKey::search(
            self.inner.name(),
            &format!("{}|{}|{}", options.category, options.limit, spec),
        ))
    }
}

#[async_trait::async_trait]
impl SearchService for CachedSearchService {
    async fn search(
        &self,
        query: &QuerySpec,
        options: &SearchOptions,
    ) -> AppResult<Vec<SearchHit>> {
        let key = self.cache_key(query, options)?;

        cached!(self.cache, key, self.ttl, async move {
            self.inner.search(query, options).await
        })
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
