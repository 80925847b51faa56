//! market-search: product search over a cached upstream provider
//!
//! A term is fetched from the provider once, enriched with the fields the
//! provider lacks, and then filtered, sorted and paged per request.

pub mod cache;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod history;
pub mod metrics;
pub mod network;
pub mod products;
pub mod providers;
pub mod search;
pub mod web;

pub use config::Settings;
pub use error::{SearchError, ValidationError};
pub use products::{Listing, Product, ProductsAnswer};
pub use search::{Search, SearchParams};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
