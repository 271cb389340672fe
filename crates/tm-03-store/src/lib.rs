//! # Transaction Store
//!
//! The bounded, ordered, in-memory index at the heart of the monitor:
//!
//! ```text
//!              ingest_batch (80 ms cadence)
//!                       │
//!                       ▼
//! by_id ──── ordered_ids (newest first, ≤ 50 000)
//!                       │
//!              filter predicate
//!                       ▼
//!            filtered_ids (subsequence of ordered_ids)
//! ```
//!
//! ## Invariants
//!
//! - `ordered_ids` holds unique ids, newest first, capped at the retention
//!   limit; every id resolves in `by_id`.
//! - `filtered_ids` is always an order-preserving subsequence of
//!   `ordered_ids` containing exactly the ids matching the current criteria.
//! - Sequence numbers are assigned once per id at first sight and never
//!   reassigned, even when the same id is ingested again.
//! - Each operation restores full consistency before returning; readers
//!   never observe a partial update.
//!
//! [`StoreService`] is the concurrency boundary: it owns the index behind a
//! lock and publishes a [`shared_bus::MonitorEvent::StoreUpdated`] after
//! every mutation.

pub mod domain;
pub mod service;

pub use domain::filters::{FilterCriteria, PartialFilters};
pub use domain::store::{IngestOutcome, StoreConfig, TxStore, UiState};
pub use service::StoreService;
