//! Observable sync state.

use chrono::{DateTime, Utc};
use tokio::sync::watch;

/// Snapshot of the engine's sync status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncState {
    /// True strictly between the start and end of an in-flight sync call,
    /// including on error exit.
    pub is_syncing: bool,
    /// When the last successful sync finished.
    pub last_sync_date: Option<DateTime<Utc>>,
}

/// Publishes [`SyncState`] changes to observers.
///
/// Only the sync engine mutates the state; consumers either poll
/// [`current`](Self::current) or await changes on a
/// [`subscribe`](Self::subscribe)d receiver. All updates go through a single
/// watch sender, so observers never see torn state.
pub struct SyncStatePublisher {
    tx: watch::Sender<SyncState>,
}

impl SyncStatePublisher {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SyncState::default());
        Self { tx }
    }

    /// Polling accessor for the latest state.
    pub fn current(&self) -> SyncState {
        self.tx.borrow().clone()
    }

    /// Receiver that wakes on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.tx.subscribe()
    }

    pub(crate) fn set_syncing(&self, syncing: bool) {
        self.tx.send_modify(|state| state.is_syncing = syncing);
    }

    pub(crate) fn mark_synced(&self, at: DateTime<Utc>) {
        self.tx.send_modify(|state| state.last_sync_date = Some(at));
    }
}

impl Default for SyncStatePublisher {
    fn default() -> Self {
        Self::new()
    }
}
