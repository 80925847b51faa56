//! Application state shared across handlers

use crate::cache::ResultCache;
use crate::config::Settings;
use crate::enrichment::RandomEnricher;
use crate::history::{HistoryStore, InMemoryHistory, NoopHistory};
use crate::metrics::Metrics;
use crate::providers::ProductProvider;
use crate::search::Search;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search orchestrator, owns the cache, history and metrics
    pub search: Arc<Search>,
}

impl AppState {
    /// Wire the search pipeline from settings around `provider`
    pub fn new(settings: Settings, provider: Arc<dyn ProductProvider>) -> Self {
        let enricher = Arc::new(RandomEnricher::from_settings(&settings.enrichment));
        let history: Arc<dyn HistoryStore> = if settings.history.enabled {
            Arc::new(InMemoryHistory::new(settings.history.max_entries_per_user))
        } else {
            Arc::new(NoopHistory)
        };

        let search = Search::new(provider, enricher)
            .with_cache(ResultCache::from_settings(&settings.cache))
            .with_history(history)
            .with_metrics(Arc::new(Metrics::new()));

        Self {
            settings: Arc::new(settings),
            search: Arc::new(search),
        }
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
