//! Search execution and orchestration

use super::models::SearchParams;
use super::{pagination, sort};
use crate::cache::ResultCache;
use crate::enrichment::Enricher;
use crate::error::SearchError;
use crate::history::{HistoryStore, NoopHistory};
use crate::metrics::Metrics;
use crate::products::{Product, ProductsAnswer};
use crate::providers::ProductProvider;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, warn};

/// Runs a product search through validation, the result cache,
/// filtering, sorting and pagination
pub struct Search {
    provider: Arc<dyn ProductProvider>,
    enricher: Arc<dyn Enricher>,
    cache: ResultCache,
    history: Arc<dyn HistoryStore>,
    metrics: Arc<Metrics>,
}

impl Search {
    /// Create a search with an empty cache and no history recording
    pub fn new(provider: Arc<dyn ProductProvider>, enricher: Arc<dyn Enricher>) -> Self {
        Self {
            provider,
            enricher,
            cache: ResultCache::new(),
            history: Arc::new(NoopHistory),
            metrics: Arc::new(Metrics::new()),
        }
    }

    pub fn with_cache(mut self, cache: ResultCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_history(mut self, history: Arc<dyn HistoryStore>) -> Self {
        self.history = history;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn history(&self) -> &Arc<dyn HistoryStore> {
        &self.history
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Execute a search, returning the pre-pagination match count and
    /// the requested page
    pub async fn execute(&self, params: &SearchParams) -> Result<ProductsAnswer, SearchError> {
        self.metrics.inc_search();

        let result = self.run(params).await;
        match &result {
            Ok(_) => {
                if let Some(ref user) = params.user {
                    self.record_history(user, &params.term);
                }
            }
            Err(SearchError::Validation(e)) => {
                self.metrics.record_validation_failure();
                warn!("Rejected search '{}' at {}: {}", params.term, e.stage(), e);
            }
            Err(e @ SearchError::Provider(_)) => {
                self.metrics.record_provider_failure();
                error!("Search '{}' failed: {}", params.term, e);
            }
        }
        result
    }

    async fn run(&self, params: &SearchParams) -> Result<ProductsAnswer, SearchError> {
        params.filters.validate()?;
        pagination::validate_page(params.page, params.page_size)?;

        let cached = self.fetch(&params.term).await?;

        let products = params.filters.apply(cached.as_ref().clone());
        let amount = products.len();
        debug!(
            "Search '{}': {} of {} products match filters",
            params.term,
            amount,
            cached.len()
        );

        let products = sort::by_price(products, params.price_order);
        let products = sort::by_name(products, params.name_order);
        let page = pagination::paginate(products, params.page, params.page_size)?;

        Ok(ProductsAnswer::new(amount, page))
    }

    /// Cached products for `term`; enrichment happens once per cache fill
    async fn fetch(&self, term: &str) -> Result<Arc<Vec<Product>>, SearchError> {
        let lookup = self
            .cache
            .get_or_fetch(term, async {
                let start = Instant::now();
                let listings = self.provider.search(term).await?;
                self.metrics
                    .record_fetch_time(start.elapsed().as_millis() as u64);
                debug!(
                    "Provider {} returned {} listings for '{}'",
                    self.provider.name(),
                    listings.len(),
                    term
                );
                Ok::<_, anyhow::Error>(self.enricher.enrich(listings))
            })
            .await
            .map_err(SearchError::Provider)?;

        self.metrics.record_cache(lookup.hit);
        Ok(lookup.products)
    }

    /// Fire-and-forget; failures are logged, never returned
    fn record_history(&self, user: &str, term: &str) {
        let history = self.history.clone();
        let user = user.to_string();
        let term = term.to_string();

        tokio::spawn(async move {
            if let Err(e) = history.add_history(&user, &term).await {
                warn!("Failed to record history for {}: {:#}", user, e);
            }
        });
    }
}
