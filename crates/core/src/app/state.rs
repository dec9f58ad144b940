//! The single shared round record.
//!
//! Only the scheduler writes, one action at a time; any number of readers may
//! take a consistent copy at any moment. Writers build their values first and
//! hold the lock only to swap them in, so a reader sees a snapshot either whole
//! or not at all.
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::digit::Outcome;
use crate::domain::round::RoundKey;
use crate::domain::snapshot::Snapshot;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundState {
    pub snapshot: Option<Snapshot>,
    pub final_outcome: Option<Outcome>,
    pub previous_outcome: Option<Outcome>,
    pub last_prepared_key: Option<RoundKey>,
}

/// Read-only view handed to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundStatus {
    pub previous: Option<Outcome>,
    pub final_outcome: Option<Outcome>,
    pub snapshot: Option<Snapshot>,
    pub server_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct RoundStore {
    inner: Arc<RwLock<RoundState>>,
}

impl RoundStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RoundState {
        self.inner.read().await.clone()
    }

    pub async fn status(&self, server_time: DateTime<Utc>) -> RoundStatus {
        let guard = self.inner.read().await;
        RoundStatus {
            previous: guard.previous_outcome,
            final_outcome: guard.final_outcome,
            snapshot: guard.snapshot.clone(),
            server_time,
        }
    }

    pub async fn is_prepared(&self, key: &RoundKey) -> bool {
        self.inner.read().await.last_prepared_key.as_ref() == Some(key)
    }

    pub async fn has_snapshot(&self) -> bool {
        self.inner.read().await.snapshot.is_some()
    }

    pub async fn current_snapshot(&self) -> Option<Snapshot> {
        self.inner.read().await.snapshot.clone()
    }

    /// Stores the snapshot and marks its round prepared. Returns `false`
    /// without touching anything if that round was already prepared.
    pub async fn install_snapshot(&self, snapshot: Snapshot) -> bool {
        let mut guard = self.inner.write().await;
        if guard.last_prepared_key.as_ref() == Some(&snapshot.key) {
            return false;
        }
        guard.last_prepared_key = Some(snapshot.key.clone());
        guard.snapshot = Some(snapshot);
        true
    }

    /// Publishes a new final outcome, shifting the old one into `previous` and
    /// clearing the snapshot. `last_prepared_key` is left as is.
    pub async fn publish(&self, outcome: Outcome) {
        let mut guard = self.inner.write().await;
        guard.previous_outcome = guard.final_outcome.replace(outcome);
        guard.snapshot = None;
    }
}
