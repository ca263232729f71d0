/// Read-through caching for an async computation.
///
/// Looks `$key` up in `$cache`. On a hit the cached value is returned as `Ok`.
/// On a miss, or when Redis cannot be read, `$block` is awaited, its value is
/// queued for a background write with `$ttl` seconds to live, and returned as
/// `Ok`. Errors from `$block` propagate with `?`, so the enclosing function
/// must return `AppResult`.
///
/// # Example
/// ```rust,ignore
/// cached!(self.cache, CacheKey::search("google", &rendered), ttl, async move {
///     self.inner.search(query, options).await
/// })
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        match $cache.get_from_cache(&$key).await {
            Ok(Some(cached)) => {
                tracing::debug!(key = %$key, "Cache hit");
                Ok(cached)
            }
            lookup => {
                if let Err(e) = lookup {
                    tracing::warn!(key = %$key, error = %e, "Cache read failed, bypassing cache");
                }
                let value = $block.await?;
                $cache.set_in_background(&$key, &value, $ttl);
                Ok(value)
            }
        }
    }};
}
