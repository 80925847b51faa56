//! Per-user search history
//!
//! The search pipeline only ever appends; reading back is offered by the
//! in-memory store for the `/history` endpoint.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

/// One recorded search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub term: String,
    pub searched_at: DateTime<Utc>,
}

/// Sink for successful searches made by identified users
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn add_history(&self, user: &str, term: &str) -> anyhow::Result<()>;

    /// Entries for `user`, oldest first. Stores that cannot read back
    /// return `None`.
    async fn entries(&self, _user: &str) -> Option<Vec<HistoryEntry>> {
        None
    }
}

/// Keeps the most recent searches of every user in memory
pub struct InMemoryHistory {
    entries: RwLock<HashMap<String, VecDeque<HistoryEntry>>>,
    max_entries_per_user: usize,
}

impl InMemoryHistory {
    pub fn new(max_entries_per_user: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries_per_user: max_entries_per_user.max(1),
        }
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistory {
    async fn add_history(&self, user: &str, term: &str) -> anyhow::Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow::anyhow!("history lock poisoned"))?;
        let list = entries.entry(user.to_string()).or_default();

        if list.len() >= self.max_entries_per_user {
            list.pop_front();
        }
        list.push_back(HistoryEntry {
            term: term.to_string(),
            searched_at: Utc::now(),
        });
        Ok(())
    }

    async fn entries(&self, user: &str) -> Option<Vec<HistoryEntry>> {
        let entries = self.entries.read().ok()?;
        Some(
            entries
                .get(user)
                .map(|list| list.iter().cloned().collect())
                .unwrap_or_default(),
        )
    }
}

/// Discards everything; used when history is disabled
pub struct NoopHistory;

#[async_trait]
impl HistoryStore for NoopHistory {
    async fn add_history(&self, _user: &str, _term: &str) -> anyhow::Result<()> {
        Ok(())
    }
}
