//! Provider loader for initializing the upstream from configuration

use super::engine::EngineProvider;
use super::fixed::StaticProvider;
use super::traits::{ProductEngine, ProductProvider};
use super::{citilink, json};
use crate::config::Settings;
use crate::network::HttpClient;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Builds the configured product provider
pub struct ProviderLoader;

impl ProviderLoader {
    /// Create the provider named by `settings.provider.engine`
    pub fn load(settings: &Settings, client: HttpClient) -> Result<Arc<dyn ProductProvider>> {
        let config = &settings.provider;

        if config.engine == "static" {
            info!(
                "Loaded static provider with {} listings",
                config.fixtures.len()
            );
            return Ok(Arc::new(StaticProvider::new(config.fixtures.clone())));
        }

        let engine = Self::create_engine(&config.engine, config.base_url.as_deref())?;
        let mut provider = EngineProvider::new(client, engine);
        if let Some(timeout) = config.timeout {
            provider = provider.with_timeout(Duration::try_from_secs_f64(timeout)?);
        }

        info!("Loaded provider engine: {}", config.engine);
        Ok(Arc::new(provider))
    }

    /// Create an engine instance by name
    fn create_engine(engine_type: &str, base_url: Option<&str>) -> Result<Arc<dyn ProductEngine>> {
        let engine: Arc<dyn ProductEngine> = match engine_type {
            "citilink" => match base_url {
                Some(url) => Arc::new(citilink::Citilink::with_base_url(url)),
                None => Arc::new(citilink::Citilink::new()),
            },
            "json" => {
                let url = base_url
                    .ok_or_else(|| anyhow::anyhow!("provider.base_url is required for the json engine"))?;
                Arc::new(json::JsonApi::new(url))
            }
            _ => {
                return Err(anyhow::anyhow!(
                    "Unknown provider engine: {} (available: {})",
                    engine_type,
                    Self::available_engines().join(", ")
                ));
            }
        };

        Ok(engine)
    }

    /// Get list of available engine types
    pub fn available_engines() -> Vec<&'static str> {
        vec!["citilink", "json", "static"]
    }
}
