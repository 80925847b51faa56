//! HTTP API tests for the search router
//!
//! Requests go through the full router against a static provider, so no
//! network access is needed.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use market_search::{
    config::Settings,
    products::Listing,
    providers::StaticProvider,
    web::{create_router, AppState},
    ProductsAnswer,
};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.provider.engine = "static".to_string();
    settings.enrichment.seed = Some(11);
    settings
}

fn mice() -> Vec<Listing> {
    vec![
        Listing::new("Mouse Logitech M185", 1290),
        Listing::new("Mouse A4Tech OP-720", 590),
        Listing::new("Mouse Razer Viper", 5990),
        Listing::new("Mouse Defender", 350),
        Listing::new("Mouse Xiaomi", 990),
    ]
}

fn app_with(provider: Arc<StaticProvider>) -> Router {
    create_router(AppState::new(settings(), provider))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_search_returns_count_and_page() {
    let app = app_with(Arc::new(StaticProvider::new(mice())));

    let (status, body) = get(&app, "/search?query=mouse&page=0&page_size=2").await;
    assert_eq!(status, StatusCode::OK);

    let answer: ProductsAnswer = serde_json::from_slice(&body).unwrap();
    assert_eq!(answer.amount, 5);
    assert_eq!(answer.products.len(), 2);
    for product in &answer.products {
        assert!(["Ситилинк", "DNS"].contains(&product.marketplace.as_str()));
        assert!((0.0..=4.9).contains(&product.rating));
    }
}

#[tokio::test]
async fn test_inverted_price_range_is_a_client_error() {
    let app = app_with(Arc::new(StaticProvider::new(mice())));

    let (status, body) = get(
        &app,
        "/search?query=mouse&page=0&page_size=10&low_price=100&high_price=50",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        String::from_utf8(body).unwrap(),
        "Lowest price cannot be greater than highest price value. Provided 100 > 50"
    );
}

#[tokio::test]
async fn test_out_of_range_page_is_a_client_error() {
    let app = app_with(Arc::new(StaticProvider::new(mice())));

    let (status, body) = get(&app, "/search?query=mouse&page=3&page_size=10").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8(body).unwrap().contains("Page 3"));
}

#[tokio::test]
async fn test_missing_page_size_is_rejected() {
    let app = app_with(Arc::new(StaticProvider::new(mice())));

    let (status, _) = get(&app, "/search?query=mouse&page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sorted_and_filtered_search() {
    let app = app_with(Arc::new(StaticProvider::new(mice())));

    let (status, body) = get(
        &app,
        "/search?query=mouse&page=0&page_size=10&high_price=1300&price_order=true",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let answer: ProductsAnswer = serde_json::from_slice(&body).unwrap();
    let prices: Vec<i64> = answer.products.iter().map(|p| p.price).collect();
    assert_eq!(answer.amount, 4);
    assert_eq!(prices, vec![1290, 990, 590, 350]);
}

#[tokio::test]
async fn test_repeated_search_hits_cache() {
    let provider = Arc::new(StaticProvider::new(mice()));
    let app = app_with(provider.clone());
    let uri = "/search?query=mouse&page=0&page_size=5";

    let (_, first) = get(&app, uri).await;
    let (_, second) = get(&app, uri).await;

    assert_eq!(provider.calls(), 1);
    assert_eq!(first, second);

    let (status, body) = get(&app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    let stats: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(stats["total_searches"], 2);
    assert_eq!(stats["cache_hits"], 1);
    assert_eq!(stats["cached_terms"], 1);
}

#[tokio::test]
async fn test_history_endpoint_lists_user_searches() {
    let app = app_with(Arc::new(StaticProvider::new(mice())));

    let (status, _) = get(&app, "/search?query=mouse&page=0&page_size=5&login=alice").await;
    assert_eq!(status, StatusCode::OK);

    // Recording runs in the background
    let mut entries = serde_json::Value::Null;
    for _ in 0..50 {
        let (status, body) = get(&app, "/history/alice").await;
        assert_eq!(status, StatusCode::OK);
        entries = serde_json::from_slice(&body).unwrap();
        if entries.as_array().map_or(false, |e| !e.is_empty()) {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    assert_eq!(entries[0]["term"], "mouse");
}

#[tokio::test]
async fn test_health() {
    let app = app_with(Arc::new(StaticProvider::new(Vec::new())));

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let health: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["provider"], "static");
}
