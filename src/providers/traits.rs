//! Provider traits and request/response types

use crate::products::Listing;
use async_trait::async_trait;
use std::collections::HashMap;

/// HTTP GET request to be made on behalf of an engine
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// URL to request
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: Vec<(String, String)>,
}

impl EngineRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            params: Vec::new(),
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

/// Body fragments only found on challenge pages
const CAPTCHA_MARKERS: [&str; 3] = [
    r#"action="/showcaptcha"#,
    r#"id="captcha-form""#,
    r#"name="captcha_response""#,
];

/// HTTP response handed back to an engine for parsing
#[derive(Debug)]
pub struct EngineResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl EngineResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> anyhow::Result<T> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the storefront answered with an anti-bot page: either a
    /// redirect onto a captcha path or a body carrying the challenge form
    pub fn is_captcha(&self) -> bool {
        let redirected = url::Url::parse(&self.url)
            .map(|url| url.path().to_ascii_lowercase().contains("captcha"))
            .unwrap_or(false);
        redirected || CAPTCHA_MARKERS.iter().any(|marker| self.text.contains(marker))
    }
}

/// A storefront or API that can be queried over HTTP.
///
/// Engines only build requests and parse responses; the transport lives
/// in [`EngineProvider`](super::EngineProvider).
pub trait ProductEngine: Send + Sync {
    /// Engine name
    fn name(&self) -> &str;

    /// Default timeout in seconds
    fn timeout(&self) -> f64 {
        10.0
    }

    /// Build the HTTP request for a search term
    fn request(&self, term: &str) -> anyhow::Result<EngineRequest>;

    /// Parse the HTTP response into listings
    fn response(&self, response: EngineResponse) -> anyhow::Result<Vec<Listing>>;
}

/// Source of raw listings for a search term
#[async_trait]
pub trait ProductProvider: Send + Sync {
    /// Provider name, used in logs
    fn name(&self) -> &str;

    /// Fetch every listing the upstream has for `term`
    async fn search(&self, term: &str) -> anyhow::Result<Vec<Listing>>;
}
