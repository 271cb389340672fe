//! Shared handle around the index.
//!
//! All mutation goes through this service: it holds the lock, applies the
//! change and publishes a `StoreUpdated` notification with a fresh revision
//! so consumers re-read. Connection changes additionally go out on the
//! connection topic.

use crate::domain::filters::{FilterCriteria, PartialFilters};
use crate::domain::store::{IngestOutcome, StoreConfig, TxStore, UiState};
use shared_bus::{InMemoryEventBus, MonitorEvent};
use shared_types::{ConnectionStatus, Transaction};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

pub struct StoreService {
    store: Mutex<TxStore>,
    bus: Arc<InMemoryEventBus>,
    revision: AtomicU64,
}

impl StoreService {
    pub fn new(config: StoreConfig, bus: Arc<InMemoryEventBus>) -> Self {
        Self {
            store: Mutex::new(TxStore::new(config)),
            bus,
            revision: AtomicU64::new(0),
        }
    }

    /// The index is plain data behind the lock; a poisoned lock just means
    /// a reader panicked mid-read, so recover the guard.
    fn lock(&self) -> MutexGuard<'_, TxStore> {
        match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn notify(&self) {
        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        self.bus.publish_now(MonitorEvent::StoreUpdated { revision });
    }

    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    // ------------------------------------------------------------------
    // Mutations (each one notifies)
    // ------------------------------------------------------------------

    pub fn ingest_batch(&self, batch: Vec<Transaction>) -> IngestOutcome {
        if batch.is_empty() {
            return IngestOutcome::default();
        }
        let outcome = self.lock().ingest_batch(batch);
        self.notify();
        outcome
    }

    pub fn set_filters(&self, partial: PartialFilters) {
        self.lock().set_filters(partial);
        self.notify();
    }

    pub fn set_flagged(&self, id: &str, flagged: bool) -> bool {
        let changed = self.lock().set_flagged(id, flagged);
        if changed {
            self.notify();
        }
        changed
    }

    pub fn set_connection_status(&self, status: ConnectionStatus) {
        debug!(?status, "Connection status changed");
        self.lock().set_connection_status(status);
        self.bus.publish_now(MonitorEvent::ConnectionChanged(status));
        self.notify();
    }

    pub fn add_missed(&self, count: u64) {
        if count == 0 {
            return;
        }
        self.lock().add_missed(count);
        self.notify();
    }

    pub fn reset_missed(&self) {
        self.lock().reset_missed();
        self.notify();
    }

    pub fn toggle_paused(&self) -> bool {
        let paused = self.lock().toggle_paused();
        self.notify();
        paused
    }

    pub fn set_auto_scroll(&self, enabled: bool) {
        self.lock().set_auto_scroll(enabled);
        self.notify();
    }

    pub fn select(&self, id: Option<String>) {
        self.lock().select(id);
        self.notify();
    }

    // ------------------------------------------------------------------
    // Reads (consistent snapshots under the lock)
    // ------------------------------------------------------------------

    pub fn get(&self, id: &str) -> Option<Transaction> {
        self.lock().get(id).cloned()
    }

    pub fn selected(&self) -> Option<Transaction> {
        self.lock().selected().cloned()
    }

    pub fn filtered_ids(&self) -> Vec<String> {
        self.lock().filtered_ids().iter().cloned().collect()
    }

    pub fn filters(&self) -> FilterCriteria {
        self.lock().filters().clone()
    }

    pub fn ui(&self) -> UiState {
        self.lock().ui().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Runs a closure against one consistent snapshot of the index.
    pub fn read<T>(&self, f: impl FnOnce(&TxStore) -> T) -> T {
        f(&self.lock())
    }
}
