//! The bounded ordered index with a filtered view.
//!
//! ## Data Structures
//!
//! - `by_id`: O(1) entity lookup
//! - `ordered_ids`: arrival order, newest first, capped at `max_keep`
//! - `filtered_ids`: order-preserving subsequence of `ordered_ids` holding
//!   exactly the current matches
//! - `seq_by_id`: monotone sequence number per id, assigned once
//!
//! ## Invariants Enforced
//!
//! - No duplicate positions: re-ingesting a known id overwrites the entity
//!   in place, never adds a second entry to either index.
//! - Sequence numbers are never reassigned or reused.
//! - Capacity eviction removes an id from every structure in the same step.
//! - Batch application is O(batch); only `recompute_filtered` scans the
//!   whole index.

use super::filters::{FilterCriteria, PartialFilters};
use shared_types::{ConnectionStatus, SeqNo, Transaction};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Retention tuning.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Maximum retained transactions; the oldest are evicted beyond this.
    pub max_keep: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { max_keep: 50_000 }
    }
}

/// Presentation state colocated with the index so every consumer sees one
/// consistent snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct UiState {
    pub connection_status: ConnectionStatus,
    /// Cumulative events lost to overflow or disconnects. Monotone except
    /// for the explicit reset.
    pub missed_count: u64,
    pub paused: bool,
    pub auto_scroll: bool,
    pub selected_id: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            connection_status: ConnectionStatus::Connecting,
            missed_count: 0,
            paused: false,
            auto_scroll: false,
            selected_id: None,
        }
    }
}

/// What one `ingest_batch` call did, for logging and assertions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestOutcome {
    /// Ids seen for the first time.
    pub new_ids: usize,
    /// Known ids whose entity was overwritten.
    pub updated: usize,
    /// Ids evicted by the retention cap.
    pub evicted: usize,
}

/// The transaction index. Purely synchronous; [`crate::StoreService`] owns
/// the lock and the change notifications.
#[derive(Debug)]
pub struct TxStore {
    config: StoreConfig,

    /// All retained transactions by id.
    by_id: HashMap<String, Transaction>,

    /// Arrival order, newest first. Unique; len <= max_keep.
    ordered_ids: VecDeque<String>,

    /// Current matches, same relative order as `ordered_ids`.
    filtered_ids: VecDeque<String>,

    /// Sequence number per retained id.
    seq_by_id: HashMap<String, SeqNo>,

    /// Next sequence number to hand out. Starts at 1, never decreases.
    next_seq: SeqNo,

    filters: FilterCriteria,
    ui: UiState,
}

impl TxStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            by_id: HashMap::new(),
            ordered_ids: VecDeque::new(),
            filtered_ids: VecDeque::new(),
            seq_by_id: HashMap::new(),
            next_seq: 1,
            filters: FilterCriteria::default(),
            ui: UiState::default(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(StoreConfig::default())
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.ordered_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_ids.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.by_id.get(id)
    }

    pub fn seq_of(&self, id: &str) -> Option<SeqNo> {
        self.seq_by_id.get(id).copied()
    }

    pub fn ordered_ids(&self) -> &VecDeque<String> {
        &self.ordered_ids
    }

    pub fn filtered_ids(&self) -> &VecDeque<String> {
        &self.filtered_ids
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// The selected transaction, or `None` when nothing is selected or the
    /// selected id has since been evicted.
    pub fn selected(&self) -> Option<&Transaction> {
        let id = self.ui.selected_id.as_deref()?;
        self.by_id.get(id)
    }

    // ------------------------------------------------------------------
    // Ingestion
    // ------------------------------------------------------------------

    /// Applies one flushed batch atomically.
    ///
    /// Entities upsert with last-write-wins. Only genuinely new ids gain a
    /// position (prepended in batch order) and a sequence number. The
    /// retention cap then evicts the oldest ids from every structure, and
    /// the filter predicate runs over the new ids only.
    pub fn ingest_batch(&mut self, batch: Vec<Transaction>) -> IngestOutcome {
        if batch.is_empty() {
            return IngestOutcome::default();
        }

        let mut outcome = IngestOutcome::default();
        let mut new_ids: Vec<String> = Vec::new();

        for tx in batch {
            if self.by_id.contains_key(&tx.id) {
                outcome.updated += 1;
            } else {
                self.seq_by_id.insert(tx.id.clone(), self.next_seq);
                self.next_seq += 1;
                new_ids.push(tx.id.clone());
                outcome.new_ids += 1;
            }
            self.by_id.insert(tx.id.clone(), tx);
        }

        for id in new_ids.iter().rev() {
            self.ordered_ids.push_front(id.clone());
        }

        // Enforce retention. Evicted ids leave every structure.
        let mut evicted: HashSet<String> = HashSet::new();
        while self.ordered_ids.len() > self.config.max_keep {
            let Some(id) = self.ordered_ids.pop_back() else {
                break;
            };
            self.by_id.remove(&id);
            self.seq_by_id.remove(&id);
            evicted.insert(id);
        }
        outcome.evicted = evicted.len();

        // Incremental filtering: only the new ids are evaluated. Evicted
        // ids were the oldest, so in the filtered view they always form a
        // suffix and pop off the back.
        for id in new_ids.iter().rev() {
            let matches = self
                .by_id
                .get(id)
                .is_some_and(|tx| self.filters.matches(tx));
            if matches {
                self.filtered_ids.push_front(id.clone());
            }
        }
        if !evicted.is_empty() {
            while let Some(last) = self.filtered_ids.back() {
                if evicted.contains(last) {
                    self.filtered_ids.pop_back();
                } else {
                    break;
                }
            }
        }

        debug!(
            new = outcome.new_ids,
            updated = outcome.updated,
            evicted = outcome.evicted,
            total = self.ordered_ids.len(),
            "Batch ingested"
        );
        outcome
    }

    // ------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------

    /// Rebuilds `filtered_ids` from scratch by scanning the whole index.
    pub fn recompute_filtered(&mut self) {
        self.filtered_ids = self
            .ordered_ids
            .iter()
            .filter(|id| {
                self.by_id
                    .get(*id)
                    .is_some_and(|tx| self.filters.matches(tx))
            })
            .cloned()
            .collect();
    }

    /// Merges a partial criteria update and recomputes the filtered view.
    pub fn set_filters(&mut self, partial: PartialFilters) {
        self.filters.merge(partial);
        self.recompute_filtered();
        debug!(matches = self.filtered_ids.len(), "Filters updated");
    }

    // ------------------------------------------------------------------
    // Single-entity and UI mutations
    // ------------------------------------------------------------------

    /// Flags or unflags one transaction. Returns false (and changes
    /// nothing) when the id is unknown.
    pub fn set_flagged(&mut self, id: &str, flagged: bool) -> bool {
        match self.by_id.get_mut(id) {
            Some(tx) => {
                tx.flagged = flagged;
                true
            }
            None => false,
        }
    }

    pub fn set_connection_status(&mut self, status: ConnectionStatus) {
        self.ui.connection_status = status;
    }

    pub fn add_missed(&mut self, count: u64) {
        self.ui.missed_count += count;
    }

    pub fn reset_missed(&mut self) {
        self.ui.missed_count = 0;
    }

    /// Flips the paused flag and returns the new value.
    pub fn toggle_paused(&mut self) -> bool {
        self.ui.paused = !self.ui.paused;
        self.ui.paused
    }

    pub fn set_auto_scroll(&mut self, enabled: bool) {
        self.ui.auto_scroll = enabled;
    }

    pub fn select(&mut self, id: Option<String>) {
        self.ui.selected_id = id;
    }
}
