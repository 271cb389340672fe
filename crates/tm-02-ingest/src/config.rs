//! Configuration for the ingestion layer.

/// Buffer and flush tuning.
#[derive(Clone, Debug)]
pub struct IngestConfig {
    /// Maximum buffered events between flushes. Beyond this the oldest
    /// entries are dropped; recency matters more than completeness for a
    /// live monitor.
    pub max_buffer: usize,

    /// Flush cadence in milliseconds.
    pub flush_interval_ms: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_buffer: 5000,
            flush_interval_ms: 80,
        }
    }
}

/// Reconnection backoff tuning: `min(base * attempt, max)`.
#[derive(Clone, Debug)]
pub struct ReconnectConfig {
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 1000,
            max_delay_ms: 5000,
        }
    }
}
