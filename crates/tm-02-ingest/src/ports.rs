//! Outbound (driven) ports for the ingestion layer.
//!
//! These traits define what the ingestion layer needs from the rest of the
//! system; the runtime wires them to the store and the feed.

use shared_types::{ConnectionStatus, Transaction};

/// Where flushed batches land. Implemented by the store handle.
pub trait BatchSink: Send + Sync {
    /// Applies one drained batch in a single atomic step.
    fn apply_batch(&self, batch: Vec<Transaction>);

    /// Adds to the cumulative missed-event total (buffer overflow or
    /// disconnect losses).
    fn record_missed(&self, count: u64);

    /// Publishes the connection status for the UI.
    fn set_connection(&self, status: ConnectionStatus);

    /// Whether the user paused the live view. While paused, flush ticks are
    /// no-ops and the buffer keeps accumulating.
    fn is_paused(&self) -> bool;
}

/// Minimal control surface of the producer, used by the reconnection
/// supervisor.
pub trait FeedControl: Send + Sync {
    fn connect(&self);
}
