//! Product provider module
//!
//! Defines the provider traits, the HTTP-backed engines and the loader
//! that picks one from settings.

mod engine;
mod fixed;
mod loader;
mod traits;

// Engine implementations
pub mod citilink;
pub mod json;

pub use engine::EngineProvider;
pub use fixed::StaticProvider;
pub use loader::ProviderLoader;
pub use traits::*;
