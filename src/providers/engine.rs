//! Provider backed by an HTTP engine

use super::traits::{ProductEngine, ProductProvider};
use crate::network::HttpClient;
use crate::products::Listing;
use anyhow::{bail, Context};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::debug;

/// Runs an engine's request through the shared HTTP client
pub struct EngineProvider {
    client: HttpClient,
    engine: Arc<dyn ProductEngine>,
    timeout: Duration,
}

impl EngineProvider {
    pub fn new(client: HttpClient, engine: Arc<dyn ProductEngine>) -> Self {
        let timeout = Duration::from_secs_f64(engine.timeout());
        Self {
            client,
            engine,
            timeout,
        }
    }

    /// Override the engine's default timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ProductProvider for EngineProvider {
    fn name(&self) -> &str {
        self.engine.name()
    }

    async fn search(&self, term: &str) -> anyhow::Result<Vec<Listing>> {
        let name = self.engine.name();
        let start = Instant::now();

        let request = self
            .engine
            .request(term)
            .with_context(|| format!("{name}: failed to build request"))?;

        let response = timeout(
            self.timeout,
            self.client.execute_with_timeout(request, self.timeout),
        )
        .await
        .with_context(|| format!("{name}: timed out after {:?}", self.timeout))?
        .with_context(|| format!("{name}: request failed"))?;

        if !response.is_success() {
            bail!("{name}: HTTP error {}", response.status);
        }
        if response.is_captcha() {
            bail!("{name}: CAPTCHA required");
        }

        let listings = self
            .engine
            .response(response)
            .with_context(|| format!("{name}: failed to parse response"))?;

        debug!(
            "Engine {} returned {} listings in {:?}",
            name,
            listings.len(),
            start.elapsed()
        );

        Ok(listings)
    }
}
