//! HTTP networking module
//!
//! Provides the HTTP client used by product engines.

mod client;
mod user_agent;

pub use client::HttpClient;
pub use user_agent::browser_user_agent;
