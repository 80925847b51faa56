//! Filter stages
//!
//! Each stage consumes the sequence and returns the kept products in
//! their original order. An absent parameter passes everything through.

use super::models::Filters;
use crate::error::ValidationError;
use crate::products::Product;

impl Filters {
    /// Reject bounds that can never match anything sensible
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(low) = self.low_price {
            if low < 0 {
                return Err(ValidationError::NegativeLowPrice(low));
            }
        }
        if let Some(high) = self.high_price {
            if high < 0 {
                return Err(ValidationError::NegativeHighPrice(high));
            }
        }
        if let (Some(low), Some(high)) = (self.low_price, self.high_price) {
            if low > high {
                return Err(ValidationError::InvertedPriceRange { low, high });
            }
        }
        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(ValidationError::RatingOutOfRange(rating));
            }
        }
        Ok(())
    }

    /// Run every stage: low price, high price, rating, marketplace
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        let products = by_low_price(products, self.low_price);
        let products = by_high_price(products, self.high_price);
        let products = by_rating(products, self.rating);
        by_marketplace(products, self.marketplace.as_deref())
    }
}

pub fn by_low_price(products: Vec<Product>, low_price: Option<i64>) -> Vec<Product> {
    match low_price {
        Some(low) => products.into_iter().filter(|p| p.price >= low).collect(),
        None => products,
    }
}

pub fn by_high_price(products: Vec<Product>, high_price: Option<i64>) -> Vec<Product> {
    match high_price {
        Some(high) => products.into_iter().filter(|p| p.price <= high).collect(),
        None => products,
    }
}

pub fn by_rating(products: Vec<Product>, rating: Option<f32>) -> Vec<Product> {
    match rating {
        Some(min) => products.into_iter().filter(|p| p.rating >= min).collect(),
        None => products,
    }
}

/// Exact, case-sensitive label match
pub fn by_marketplace(products: Vec<Product>, marketplace: Option<&str>) -> Vec<Product> {
    match marketplace {
        Some(label) => products
            .into_iter()
            .filter(|p| p.marketplace == label)
            .collect(),
        None => products,
    }
}
