//! Metrics collection module
//!
//! Tracks search volume, cache effectiveness, rejections and provider latency.

use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

const FETCH_WINDOW: usize = 100;

/// Process-wide search counters
pub struct Metrics {
    total_searches: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    validation_failures: AtomicU64,
    provider_failures: AtomicU64,
    /// Last provider fetch times in ms
    fetch_times: RwLock<VecDeque<u64>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            total_searches: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            validation_failures: AtomicU64::new(0),
            provider_failures: AtomicU64::new(0),
            fetch_times: RwLock::new(VecDeque::with_capacity(FETCH_WINDOW)),
        }
    }

    pub fn inc_search(&self) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache(&self, hit: bool) {
        let counter = if hit {
            &self.cache_hits
        } else {
            &self.cache_misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_failure(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_provider_failure(&self) {
        self.provider_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record how long a provider fetch took
    pub fn record_fetch_time(&self, time_ms: u64) {
        let Ok(mut times) = self.fetch_times.write() else {
            return;
        };
        if times.len() >= FETCH_WINDOW {
            times.pop_front();
        }
        times.push_back(time_ms);
    }

    /// Average over the recent fetch window
    pub fn avg_fetch_time(&self) -> Option<u64> {
        let times = self.fetch_times.read().ok()?;
        if times.is_empty() {
            None
        } else {
            Some(times.iter().sum::<u64>() / times.len() as u64)
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let lookups = hits + misses;

        MetricsSnapshot {
            total_searches: self.total_searches.load(Ordering::Relaxed),
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_ratio: if lookups == 0 {
                0.0
            } else {
                hits as f64 / lookups as f64
            },
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
            provider_failures: self.provider_failures.load(Ordering::Relaxed),
            avg_fetch_time_ms: self.avg_fetch_time(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view served by /stats
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_searches: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_hit_ratio: f64,
    pub validation_failures: u64,
    pub provider_failures: u64,
    pub avg_fetch_time_ms: Option<u64>,
}
