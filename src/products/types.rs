//! Product type definitions

use serde::{Deserialize, Serialize};

/// A raw search hit as returned by a product provider.
///
/// Providers usually know only the name and the price; rating and
/// marketplace are filled in by enrichment when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub marketplace: Option<String>,
}

impl Listing {
    /// Create a listing with only the fields every provider supplies
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            price,
            rating: None,
            marketplace: None,
        }
    }

    /// Attach a provider-supplied rating
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Attach a provider-supplied marketplace label
    pub fn with_marketplace(mut self, marketplace: impl Into<String>) -> Self {
        self.marketplace = Some(marketplace.into());
        self
    }
}

/// A fully enriched product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product title
    pub name: String,
    /// Price in whole currency units
    pub price: i64,
    /// Rating in [0.0, 5.0] with one decimal
    pub rating: f32,
    /// Marketplace label
    pub marketplace: String,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        price: i64,
        rating: f32,
        marketplace: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            rating,
            marketplace: marketplace.into(),
        }
    }
}

/// Payload of a successful search: the match count before pagination
/// and the requested page of products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductsAnswer {
    pub amount: usize,
    pub products: Vec<Product>,
}

impl ProductsAnswer {
    pub fn new(amount: usize, products: Vec<Product>) -> Self {
        Self { amount, products }
    }
}
