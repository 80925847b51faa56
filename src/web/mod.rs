//! Web server module
//!
//! Provides the HTTP API for market-search.

mod handlers;
mod routes;
mod state;

pub use handlers::SearchQueryParams;
pub use routes::create_router;
pub use state::AppState;
