//! Provider serving a fixed set of listings

use super::traits::ProductProvider;
use crate::products::Listing;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Offline provider: returns the configured listings whose name contains
/// the term, ignoring case. An empty term matches everything.
pub struct StaticProvider {
    listings: Vec<Listing>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Simulate a slow upstream
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of searches served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn search(&self, term: &str) -> anyhow::Result<Vec<Listing>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let needle = term.to_lowercase();
        Ok(self
            .listings
            .iter()
            .filter(|l| l.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider_matches_case_insensitively() {
        let provider = StaticProvider::new(vec![
            Listing::new("Gaming Mouse", 3000),
            Listing::new("Keyboard", 2500),
        ]);

        let listings = provider.search("mouse").await.unwrap();
        assert_eq!(listings, vec![Listing::new("Gaming Mouse", 3000)]);
        assert_eq!(provider.search("").await.unwrap().len(), 2);
        assert_eq!(provider.calls(), 2);
    }
}
