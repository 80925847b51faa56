//! Search orchestration module
//!
//! Validates parameters, resolves the term through the result cache and
//! narrows, orders and pages the cached products.

mod executor;
pub mod filters;
mod models;
pub mod pagination;
pub mod sort;

pub use executor::Search;
pub use models::*;
