//! Product data model
//!
//! Listings as they come from a provider and the enriched products
//! that leave the search pipeline.

mod types;

pub use types::*;
