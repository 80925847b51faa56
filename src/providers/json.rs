//! Generic JSON product API engine

use super::traits::*;
use crate::products::Listing;
use anyhow::Result;
use serde::Deserialize;

/// Upstream that answers `GET <base_url>?q=<term>` with JSON listings
pub struct JsonApi {
    base_url: String,
}

/// Accepted response shapes
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonBody {
    Bare(Vec<Listing>),
    Wrapped { products: Vec<Listing> },
}

impl JsonApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl ProductEngine for JsonApi {
    fn name(&self) -> &str {
        "json"
    }

    fn request(&self, term: &str) -> Result<EngineRequest> {
        let request = EngineRequest::get(&self.base_url)
            .header("Accept", "application/json")
            .param("q", term);
        Ok(request)
    }

    fn response(&self, response: EngineResponse) -> Result<Vec<Listing>> {
        let listings = match response.json::<JsonBody>()? {
            JsonBody::Bare(listings) => listings,
            JsonBody::Wrapped { products } => products,
        };
        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn ok(text: &str) -> EngineResponse {
        EngineResponse {
            status: 200,
            headers: HashMap::new(),
            text: text.to_string(),
            url: "http://localhost/".to_string(),
        }
    }

    #[test]
    fn test_json_request() {
        let engine = JsonApi::new("http://localhost:9000/products");
        let request = engine.request("usb hub").unwrap();
        assert_eq!(request.url, "http://localhost:9000/products");
        assert_eq!(request.params, vec![("q".to_string(), "usb hub".to_string())]);
    }

    #[test]
    fn test_wrapped_response_keeps_supplied_rating() {
        let engine = JsonApi::new("http://localhost/");
        let listings = engine
            .response(ok(r#"{"products": [{"name": "Hub", "price": 1200, "rating": 4.5}]}"#))
            .unwrap();
        assert_eq!(listings, vec![Listing::new("Hub", 1200).with_rating(4.5)]);
    }

    #[test]
    fn test_malformed_response_fails() {
        let engine = JsonApi::new("http://localhost/");
        assert!(engine.response(ok(r#"{"items": 3}"#)).is_err());
    }
}
