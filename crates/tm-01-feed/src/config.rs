//! Configuration for the simulated feed.

use std::ops::RangeInclusive;

/// Runtime configuration for the feed's timers.
///
/// Defaults reproduce the production simulation; tests narrow the ranges
/// (and zero the chaos probability) for determinism.
#[derive(Clone, Debug)]
pub struct FeedConfig {
    /// Delay between bursts, in milliseconds.
    pub burst_interval_ms: RangeInclusive<u64>,

    /// Number of events per burst.
    pub burst_size: RangeInclusive<u32>,

    /// Per-event emission delay, in milliseconds (network jitter).
    pub event_latency_ms: RangeInclusive<u64>,

    /// Cadence of the chaos check, in milliseconds.
    pub chaos_interval_ms: u64,

    /// Probability that one chaos check forces a disconnect.
    pub chaos_probability: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            burst_interval_ms: 2000..=3000,
            burst_size: 50..=100,
            event_latency_ms: 10..=250,
            chaos_interval_ms: 3000,
            chaos_probability: 0.08,
        }
    }
}

impl FeedConfig {
    /// A quiet configuration for tests: deterministic burst timing, no
    /// chaos disconnects.
    pub fn quiet(burst_every_ms: u64, burst_size: u32, latency_ms: u64) -> Self {
        Self {
            burst_interval_ms: burst_every_ms..=burst_every_ms,
            burst_size: burst_size..=burst_size,
            event_latency_ms: latency_ms..=latency_ms,
            chaos_interval_ms: 3000,
            chaos_probability: 0.0,
        }
    }
}
