//! Configuration module for market-search
//!
//! Handles loading and validating settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tracing::info;

/// Global settings instance
static SETTINGS: OnceCell<Settings> = OnceCell::new();

/// Initialize global settings, returning the stored copy
pub fn init(settings: Settings) -> Result<&'static Settings> {
    SETTINGS
        .set(settings)
        .map_err(|_| anyhow::anyhow!("Settings already initialized"))?;
    Ok(get())
}

/// Get a reference to the global settings, falling back to defaults
/// when `init` was never called
pub fn get() -> &'static Settings {
    SETTINGS.get_or_init(Settings::default)
}

/// Load settings from an explicit path, the environment, or the default
/// locations, then apply environment overrides and validate
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let mut settings = match locate(explicit) {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };
    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}

fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var("MARKET_SEARCH_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut candidates = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/market-search/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("market-search/settings.yml"));
    }

    candidates.into_iter().find(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests that read or write MARKET_SEARCH_* share one lock
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: [&str; 7] = [
        "MARKET_SEARCH_SETTINGS_PATH",
        "MARKET_SEARCH_DEBUG",
        "MARKET_SEARCH_PORT",
        "MARKET_SEARCH_BIND_ADDRESS",
        "MARKET_SEARCH_PROVIDER",
        "MARKET_SEARCH_PROVIDER_URL",
        "MARKET_SEARCH_ENRICHMENT_SEED",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    fn temp_settings(name: &str, yaml: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn test_load_explicit_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let path = temp_settings("market-search-settings-test.yml", "server:\n  port: 9100\n");

        let settings = load(Some(&path)).unwrap();
        assert_eq!(settings.server.port, 9100);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = std::env::temp_dir().join("market-search-does-not-exist.yml");
        assert!(load(Some(&path)).is_err());
    }

    #[test]
    fn test_env_overrides_yaml() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let path = temp_settings(
            "market-search-env-override.yml",
            "server:\n  port: 9100\nprovider:\n  engine: citilink\n",
        );

        std::env::set_var("MARKET_SEARCH_PORT", "9200");
        std::env::set_var("MARKET_SEARCH_DEBUG", "true");
        std::env::set_var("MARKET_SEARCH_BIND_ADDRESS", "0.0.0.0");
        std::env::set_var("MARKET_SEARCH_PROVIDER", "json");
        std::env::set_var("MARKET_SEARCH_PROVIDER_URL", "http://localhost:9999/api");
        std::env::set_var("MARKET_SEARCH_ENRICHMENT_SEED", "42");

        let settings = load(Some(&path));
        clear_env();
        std::fs::remove_file(path).ok();

        let settings = settings.unwrap();
        assert_eq!(settings.server.port, 9200);
        assert!(settings.general.debug);
        assert_eq!(settings.server.bind_address, "0.0.0.0");
        assert_eq!(settings.provider.engine, "json");
        assert_eq!(
            settings.provider.base_url.as_deref(),
            Some("http://localhost:9999/api")
        );
        assert_eq!(settings.enrichment.seed, Some(42));
    }

    #[test]
    fn test_unparsable_env_values_are_ignored() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        std::env::set_var("MARKET_SEARCH_PORT", "not-a-port");
        std::env::set_var("MARKET_SEARCH_ENRICHMENT_SEED", "-1");

        let mut settings = Settings::from_yaml("server:\n  port: 9100\nenrichment:\n  seed: 3\n")
            .unwrap();
        settings.merge_env();
        clear_env();

        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.enrichment.seed, Some(3));
    }

    #[test]
    fn test_locate_order() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let from_env = temp_settings("market-search-locate-env.yml", "server:\n  port: 9300\n");
        let explicit = std::env::temp_dir().join("market-search-locate-explicit.yml");

        std::env::set_var("MARKET_SEARCH_SETTINGS_PATH", &from_env);
        // An explicit path wins even when it does not exist
        let first = locate(Some(&explicit));
        let second = locate(None);
        let loaded = load(None);

        // A settings path that does not exist falls through to the defaults
        let missing = std::env::temp_dir().join("market-search-locate-missing.yml");
        std::env::set_var("MARKET_SEARCH_SETTINGS_PATH", &missing);
        let third = locate(None);

        clear_env();
        std::fs::remove_file(&from_env).ok();

        assert_eq!(first, Some(explicit));
        assert_eq!(second, Some(from_env));
        assert_eq!(loaded.unwrap().server.port, 9300);
        assert_ne!(third, Some(missing));
    }
}
