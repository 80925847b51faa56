//! Caching module for market-search
//!
//! Memoizes enriched provider results per search term. Population is
//! single-flight: concurrent misses for the same term share one fetch.

use crate::config::CacheSettings;
use crate::products::Product;
use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Result of a cache lookup
#[derive(Debug, Clone)]
pub struct CacheLookup {
    /// Shared cached list; never mutated after insertion
    pub products: Arc<Vec<Product>>,
    /// Whether the list was already cached
    pub hit: bool,
}

/// Cache of enriched results keyed by the raw search term
#[derive(Clone)]
pub struct ResultCache {
    cache: Cache<String, Arc<Vec<Product>>>,
}

impl ResultCache {
    /// Unbounded cache whose entries live for the process lifetime
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().build(),
        }
    }

    /// Create a cache honoring the optional TTL and capacity settings
    pub fn from_settings(settings: &CacheSettings) -> Self {
        let mut builder = Cache::builder();
        if let Some(ttl) = settings.ttl_seconds {
            builder = builder.time_to_live(Duration::from_secs(ttl));
        }
        if let Some(capacity) = settings.max_capacity {
            builder = builder.max_capacity(capacity);
        }

        Self {
            cache: builder.build(),
        }
    }

    /// Return the cached list for `term`, running `fetch` on a miss.
    ///
    /// Keys are case-sensitive and unnormalized. A failed fetch caches
    /// nothing; every waiter on that fetch gets the same error.
    pub async fn get_or_fetch<F>(
        &self,
        term: &str,
        fetch: F,
    ) -> Result<CacheLookup, Arc<anyhow::Error>>
    where
        F: Future<Output = anyhow::Result<Vec<Product>>>,
    {
        info!("Started fetching {}", term);
        let start = Instant::now();

        let entry = self
            .cache
            .entry_by_ref(term)
            .or_try_insert_with(async { fetch.await.map(Arc::new) })
            .await?;

        let hit = !entry.is_fresh();
        info!(
            "Fetching of {} finished in {} ms (cache {})",
            term,
            start.elapsed().as_millis(),
            if hit { "hit" } else { "miss" }
        );

        Ok(CacheLookup {
            products: entry.into_value(),
            hit,
        })
    }

    /// Get a cached result without fetching
    pub async fn get(&self, term: &str) -> Option<Arc<Vec<Product>>> {
        self.cache.get(term).await
    }

    /// Number of cached terms
    pub async fn size(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}
