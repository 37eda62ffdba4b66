//! Probe status record and its shared store.
//!
//! # States
//! - ok = true: the last probe reached the target with a 200
//! - ok = false: anything else, with the reason in `msg`
//!
//! # Design Decisions
//! - The record is immutable; every probe publishes a fresh `Arc<ProbeStatus>`
//! - Readers load a snapshot, so a reader never sees fields from two cycles
//! - `last_update` never moves backwards, even if the wall clock does

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Message published before the first probe completes.
pub const STARTED_MESSAGE: &str = "probe started";

/// Result of the most recent probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeStatus {
    pub ok: bool,
    #[serde(rename = "msg")]
    pub message: String,
    pub last_update: DateTime<Utc>,
}

impl ProbeStatus {
    pub fn new(ok: bool, message: impl Into<String>, last_update: DateTime<Utc>) -> Self {
        Self {
            ok,
            message: message.into(),
            last_update,
        }
    }

    /// The record in place between startup and the first completed probe.
    pub fn started() -> Self {
        Self::new(true, STARTED_MESSAGE, Utc::now())
    }
}

/// Shared handle to the single status record.
///
/// Cloning is cheap; every clone sees the same record.
#[derive(Clone)]
pub struct StatusStore {
    inner: Arc<ArcSwap<ProbeStatus>>,
}

impl StatusStore {
    pub fn new(initial: ProbeStatus) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(initial)),
        }
    }

    /// Current record.
    pub fn snapshot(&self) -> Arc<ProbeStatus> {
        self.inner.load_full()
    }

    /// Replace the record wholesale and return what was stored.
    ///
    /// If `status.last_update` is older than the current record's, the
    /// current timestamp is kept.
    pub fn publish(&self, status: ProbeStatus) -> Arc<ProbeStatus> {
        let mut stored = Arc::new(status);
        self.inner.rcu(|current| {
            if stored.last_update < current.last_update {
                let mut next = ProbeStatus::clone(&stored);
                next.last_update = current.last_update;
                stored = Arc::new(next);
            }
            stored.clone()
        });
        stored
    }
}

impl Default for StatusStore {
    fn default() -> Self {
        Self::new(ProbeStatus::started())
    }
}
