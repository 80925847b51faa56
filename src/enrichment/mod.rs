//! Field enrichment
//!
//! Providers do not report a rating or which marketplace a listing came
//! from, so both are synthesized here before results are cached. A rating
//! the provider did report is kept only when it lies in [0, 5].

use crate::config::EnrichmentSettings;
use crate::products::{Listing, Product};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use tracing::warn;

/// Turns provider listings into complete products
pub trait Enricher: Send + Sync {
    fn enrich(&self, listings: Vec<Listing>) -> Vec<Product>;
}

/// Fills missing ratings uniformly from {0.0, 0.1, ..., 4.9} and missing
/// marketplaces with one of two labels, each with probability 0.5
pub struct RandomEnricher {
    rng: Mutex<StdRng>,
    marketplaces: [String; 2],
}

impl RandomEnricher {
    /// Seeded enricher, produces the same sequence for the same seed
    pub fn seeded(seed: u64, marketplaces: [String; 2]) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            marketplaces,
        }
    }

    /// Enricher drawing from OS entropy
    pub fn from_entropy(marketplaces: [String; 2]) -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            marketplaces,
        }
    }

    pub fn from_settings(settings: &EnrichmentSettings) -> Self {
        match settings.seed {
            Some(seed) => Self::seeded(seed, settings.marketplaces.clone()),
            None => Self::from_entropy(settings.marketplaces.clone()),
        }
    }

    pub fn marketplaces(&self) -> &[String; 2] {
        &self.marketplaces
    }
}

impl Enricher for RandomEnricher {
    fn enrich(&self, listings: Vec<Listing>) -> Vec<Product> {
        // A poisoned lock only means another enrich panicked mid-draw;
        // the generator state is still usable.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        listings
            .into_iter()
            .map(|listing| {
                let rating = match listing.rating {
                    Some(r) if (0.0..=5.0).contains(&r) => r,
                    reported => {
                        if let Some(r) = reported {
                            warn!("Discarding out-of-range rating {} for {}", r, listing.name);
                        }
                        round_rating(rng.gen_range(0..50u32) as f32 / 10.0)
                    }
                };
                let marketplace = listing.marketplace.unwrap_or_else(|| {
                    let index = usize::from(rng.gen_bool(0.5));
                    self.marketplaces[index].clone()
                });

                Product {
                    name: listing.name,
                    price: listing.price,
                    rating,
                    marketplace,
                }
            })
            .collect()
    }
}

/// Round half-up to one decimal
fn round_rating(value: f32) -> f32 {
    (value * 10.0 + 0.5).floor() / 10.0
}
