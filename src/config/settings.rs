//! Settings structures for market-search configuration

use crate::products::Listing;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Main settings structure, mirrors settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub provider: ProviderSettings,
    pub cache: CacheSettings,
    pub enrichment: EnrichmentSettings,
    pub history: HistorySettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (MARKET_SEARCH_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("MARKET_SEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("MARKET_SEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("MARKET_SEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("MARKET_SEARCH_PROVIDER") {
            self.provider.engine = val;
        }
        if let Ok(val) = std::env::var("MARKET_SEARCH_PROVIDER_URL") {
            self.provider.base_url = Some(val);
        }
        if let Ok(val) = std::env::var("MARKET_SEARCH_ENRICHMENT_SEED") {
            if let Ok(seed) = val.parse() {
                self.enrichment.seed = Some(seed);
            }
        }
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<()> {
        let [first, second] = &self.enrichment.marketplaces;
        if first.trim().is_empty() || second.trim().is_empty() {
            bail!("enrichment.marketplaces must not contain empty labels");
        }
        if first == second {
            bail!("enrichment.marketplaces must be two distinct labels, got {first:?} twice");
        }
        if let Some(ref base_url) = self.provider.base_url {
            url::Url::parse(base_url)
                .map_err(|e| anyhow::anyhow!("invalid provider.base_url {base_url:?}: {e}"))?;
        }
        check_timeout("outgoing.request_timeout", self.outgoing.request_timeout)?;
        if let Some(timeout) = self.provider.timeout {
            check_timeout("provider.timeout", timeout)?;
        }
        Ok(())
    }
}

/// Timeouts must convert to a non-zero `Duration`
fn check_timeout(key: &str, seconds: f64) -> Result<()> {
    match Duration::try_from_secs_f64(seconds) {
        Ok(duration) if !duration.is_zero() => Ok(()),
        _ => bail!("{key} must be a positive number of seconds, got {seconds}"),
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name reported by /health
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "market-search".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub port: u16,
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy for all outgoing requests
    pub proxy: Option<String>,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            verify_ssl: true,
            proxy: None,
            extra_headers: HashMap::new(),
        }
    }
}

/// Upstream product provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Engine to use: citilink, json or static
    pub engine: String,
    /// Base URL of the upstream; engines fall back to their own default
    pub base_url: Option<String>,
    /// Timeout override in seconds
    pub timeout: Option<f64>,
    /// Listings served by the static engine
    pub fixtures: Vec<Listing>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            engine: "citilink".to_string(),
            base_url: None,
            timeout: None,
            fixtures: Vec::new(),
        }
    }
}

/// Result cache settings. Nothing expires unless configured.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub ttl_seconds: Option<u64>,
    pub max_capacity: Option<u64>,
}

/// Field enrichment settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentSettings {
    /// Seed for reproducible ratings; random when absent
    pub seed: Option<u64>,
    /// The two labels a product may be assigned to
    pub marketplaces: [String; 2],
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            seed: None,
            marketplaces: ["Ситилинк".to_string(), "DNS".to_string()],
        }
    }
}

/// Search history settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub enabled: bool,
    /// Entries kept per user, oldest dropped first
    pub max_entries_per_user: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries_per_user: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.provider.engine, "citilink");
        assert!(settings.cache.ttl_seconds.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = Settings::from_yaml(
            r#"
server:
  port: 9000
provider:
  engine: static
  fixtures:
    - name: Mouse
      price: 990
enrichment:
  seed: 7
"#,
        )
        .unwrap();

        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.bind_address, "127.0.0.1");
        assert_eq!(settings.provider.fixtures, vec![Listing::new("Mouse", 990)]);
        assert_eq!(settings.enrichment.seed, Some(7));
        assert_eq!(settings.enrichment.marketplaces[1], "DNS");
    }

    #[test]
    fn test_validate_rejects_duplicate_marketplaces() {
        let mut settings = Settings::default();
        settings.enrichment.marketplaces = ["DNS".to_string(), "DNS".to_string()];
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unusable_timeouts() {
        let settings = Settings::from_yaml("outgoing:\n  request_timeout: -1.0\n").unwrap();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("outgoing.request_timeout"));

        for timeout in [0.0, f64::NAN, f64::INFINITY, 1e300] {
            let mut settings = Settings::default();
            settings.provider.timeout = Some(timeout);
            assert!(settings.validate().is_err(), "accepted {timeout}");
        }

        let mut settings = Settings::default();
        settings.provider.timeout = Some(2.5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_provider_url() {
        let mut settings = Settings::default();
        settings.provider.base_url = Some("not a url".to_string());
        assert!(settings.validate().is_err());
    }
}
