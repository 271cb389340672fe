//! Time source abstraction.
//!
//! Logic that depends on "now" (highlight expiry, backoff bookkeeping,
//! preset creation times) takes a `TimeSource` so tests can run with
//! deterministic time.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Millisecond timestamps since the Unix epoch.
pub type Millis = i64;

/// Source of the current instant.
pub trait TimeSource: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> Millis;

    /// Current time as a `chrono` instant.
    fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(self.now_millis()).unwrap_or_else(Utc::now)
    }
}

/// Default wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_millis(&self) -> Millis {
        Utc::now().timestamp_millis()
    }
}

/// Deterministic time source for tests.
pub struct MockTimeSource {
    millis: AtomicI64,
}

impl MockTimeSource {
    pub fn new(initial: Millis) -> Self {
        Self {
            millis: AtomicI64::new(initial),
        }
    }

    pub fn advance(&self, ms: Millis) {
        self.millis.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, ms: Millis) {
        self.millis.store(ms, Ordering::SeqCst);
    }
}

impl TimeSource for MockTimeSource {
    fn now_millis(&self) -> Millis {
        self.millis.load(Ordering::SeqCst)
    }
}
