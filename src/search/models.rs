//! Search parameters and related data models

use serde::{Deserialize, Serialize};

/// Direction of a secondary ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Boundary flag convention: `false` ascending, `true` descending
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            Self::Descending
        } else {
            Self::Ascending
        }
    }
}

/// Optional narrowing predicates, all of which must hold
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    /// Keep products priced at least this much
    pub low_price: Option<i64>,
    /// Keep products priced at most this much
    pub high_price: Option<i64>,
    /// Keep products rated at least this high
    pub rating: Option<f32>,
    /// Keep products from exactly this marketplace
    pub marketplace: Option<String>,
}

/// Complete search request with all parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    /// Raw search term; also the cache key
    pub term: String,
    /// Identified user, recorded in history on success
    pub user: Option<String>,
    pub filters: Filters,
    pub price_order: Option<SortOrder>,
    pub name_order: Option<SortOrder>,
    /// Zero-based page index
    pub page: i64,
    pub page_size: i64,
}

impl SearchParams {
    /// Create a request without filters or ordering
    pub fn new(term: impl Into<String>, page: i64, page_size: i64) -> Self {
        Self {
            term: term.into(),
            user: None,
            filters: Filters::default(),
            price_order: None,
            name_order: None,
            page,
            page_size,
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_price_range(mut self, low: Option<i64>, high: Option<i64>) -> Self {
        self.filters.low_price = low;
        self.filters.high_price = high;
        self
    }

    pub fn with_min_rating(mut self, rating: f32) -> Self {
        self.filters.rating = Some(rating);
        self
    }

    pub fn with_marketplace(mut self, marketplace: impl Into<String>) -> Self {
        self.filters.marketplace = Some(marketplace.into());
        self
    }

    pub fn with_price_order(mut self, order: SortOrder) -> Self {
        self.price_order = Some(order);
        self
    }

    pub fn with_name_order(mut self, order: SortOrder) -> Self {
        self.name_order = Some(order);
        self
    }
}
