//! HTTP request handlers

use super::state::AppState;
use crate::error::SearchError;
use crate::history::HistoryEntry;
use crate::metrics::MetricsSnapshot;
use crate::products::ProductsAnswer;
use crate::search::{Filters, SearchParams, SortOrder};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Query string of `GET /search`
#[derive(Debug, Deserialize)]
pub struct SearchQueryParams {
    /// Search term
    pub query: String,
    /// User whose history the search is recorded in
    pub login: Option<String>,
    pub low_price: Option<i64>,
    pub high_price: Option<i64>,
    /// false = cheapest first, true = most expensive first
    pub price_order: Option<bool>,
    /// false = A to Z, true = Z to A
    pub name_order: Option<bool>,
    pub page: i64,
    pub page_size: i64,
    pub rating: Option<f32>,
    pub marketplace: Option<String>,
}

impl From<SearchQueryParams> for SearchParams {
    fn from(params: SearchQueryParams) -> Self {
        // Forms submit untouched fields as empty strings
        let non_empty = |s: Option<String>| s.filter(|s| !s.is_empty());

        Self {
            term: params.query,
            user: non_empty(params.login),
            filters: Filters {
                low_price: params.low_price,
                high_price: params.high_price,
                rating: params.rating,
                marketplace: non_empty(params.marketplace),
            },
            price_order: params.price_order.map(SortOrder::from_descending),
            name_order: params.name_order.map(SortOrder::from_descending),
            page: params.page,
            page_size: params.page_size,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = match self {
            SearchError::Validation(_) => StatusCode::BAD_REQUEST,
            SearchError::Provider(_) => StatusCode::BAD_GATEWAY,
        };
        (status, self.to_string()).into_response()
    }
}

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQueryParams>,
) -> Result<Json<ProductsAnswer>, SearchError> {
    let params = SearchParams::from(params);
    let answer = state.search.execute(&params).await?;
    Ok(Json(answer))
}

/// Search history of one user
pub async fn history(
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> Result<Json<Vec<HistoryEntry>>, StatusCode> {
    state
        .search
        .history()
        .entries(&login)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub metrics: MetricsSnapshot,
    pub cached_terms: u64,
}

/// Stats handler
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(StatsResponse {
        metrics: state.search.metrics().snapshot(),
        cached_terms: state.search.cache().size().await,
    })
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "instance": state.instance_name(),
        "provider": state.settings.provider.engine,
        "version": crate::VERSION
    }))
}
