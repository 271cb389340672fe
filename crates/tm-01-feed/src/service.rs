//! The feed service: burst scheduling, jittered emission, chaos disconnects.
//!
//! All mutable state lives behind one lock. Emission and cancellation both
//! run under that lock, and every timer task carries the connection epoch it
//! was scheduled in, so a disconnect is a single synchronous cut: after the
//! `FeedDisconnected` notice is published, no message from the old epoch can
//! be delivered.

use crate::config::FeedConfig;
use crate::domain::generator::generate_transaction;
use rand::Rng;
use shared_bus::{InMemoryEventBus, MonitorEvent};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

/// Simulated transaction producer.
///
/// Messages are published on the shared bus; consumers subscribe to the
/// `Feed` topic. `connect`/`disconnect` are idempotent.
pub struct MockFeed {
    bus: Arc<InMemoryEventBus>,
    config: FeedConfig,
    inner: Arc<Mutex<FeedInner>>,
}

#[derive(Default)]
struct FeedInner {
    connected: bool,
    /// Incremented on every connect and disconnect. Timer tasks from an
    /// older epoch refuse to deliver even if they win a race with `abort`.
    epoch: u64,
    next_timer_id: u64,
    /// Pending per-event emission timers; entries are removed on fire.
    pending: HashMap<u64, JoinHandle<()>>,
    burst_task: Option<JoinHandle<()>>,
    chaos_task: Option<JoinHandle<()>>,
}

impl MockFeed {
    pub fn new(bus: Arc<InMemoryEventBus>, config: FeedConfig) -> Self {
        Self {
            bus,
            config,
            inner: Arc::new(Mutex::new(FeedInner::default())),
        }
    }

    /// Starts burst scheduling and the chaos check. No-op while connected.
    pub fn connect(&self) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        if inner.connected {
            return;
        }
        inner.connected = true;
        inner.epoch += 1;
        let epoch = inner.epoch;
        info!(epoch, "Feed connected");

        inner.burst_task = Some(tokio::spawn(burst_loop(
            Arc::clone(&self.inner),
            Arc::clone(&self.bus),
            self.config.clone(),
            epoch,
        )));
        inner.chaos_task = Some(tokio::spawn(chaos_loop(
            Arc::clone(&self.inner),
            Arc::clone(&self.bus),
            self.config.clone(),
            epoch,
        )));
    }

    /// Cancels all timers, reports unfired events as missed and publishes
    /// the disconnect notice. No-op while disconnected.
    pub fn disconnect(&self) {
        disconnect_inner(&self.inner, &self.bus);
    }

    pub fn is_connected(&self) -> bool {
        self.inner.lock().map(|i| i.connected).unwrap_or(false)
    }
}

/// Performs the disconnect under the state lock.
///
/// Returns false if the feed was already disconnected.
fn disconnect_inner(inner: &Mutex<FeedInner>, bus: &InMemoryEventBus) -> bool {
    let Ok(mut guard) = inner.lock() else {
        return false;
    };
    if !guard.connected {
        return false;
    }
    guard.connected = false;
    guard.epoch += 1;

    if let Some(handle) = guard.burst_task.take() {
        handle.abort();
    }
    if let Some(handle) = guard.chaos_task.take() {
        handle.abort();
    }

    let missed = guard.pending.len() as u64;
    for (_, handle) in guard.pending.drain() {
        handle.abort();
    }

    warn!(missed, "Feed disconnected");
    bus.publish_now(MonitorEvent::FeedDisconnected { missed });
    true
}

/// Schedules one burst of jittered emission timers. Sync so the burst loop
/// never holds the lock across an await.
///
/// Returns false once the epoch is stale.
fn schedule_burst(
    inner: &Arc<Mutex<FeedInner>>,
    bus: &Arc<InMemoryEventBus>,
    config: &FeedConfig,
    epoch: u64,
) -> bool {
    let Ok(mut guard) = inner.lock() else {
        return false;
    };
    if !guard.connected || guard.epoch != epoch {
        return false;
    }

    let mut rng = rand::thread_rng();
    let burst_size = rng.gen_range(config.burst_size.clone());

    for _ in 0..burst_size {
        let latency_ms = rng.gen_range(config.event_latency_ms.clone());
        let timer_id = guard.next_timer_id;
        guard.next_timer_id += 1;

        let handle = tokio::spawn(emit_after(
            Arc::clone(inner),
            Arc::clone(bus),
            epoch,
            timer_id,
            latency_ms,
        ));
        guard.pending.insert(timer_id, handle);
    }

    debug!(burst_size, "Burst scheduled");
    true
}

fn rand_millis(range: &std::ops::RangeInclusive<u64>) -> u64 {
    rand::thread_rng().gen_range(range.clone())
}

async fn burst_loop(
    inner: Arc<Mutex<FeedInner>>,
    bus: Arc<InMemoryEventBus>,
    config: FeedConfig,
    epoch: u64,
) {
    loop {
        let delay = rand_millis(&config.burst_interval_ms);
        sleep(Duration::from_millis(delay)).await;

        if !schedule_burst(&inner, &bus, &config, epoch) {
            return;
        }
    }
}

async fn emit_after(
    inner: Arc<Mutex<FeedInner>>,
    bus: Arc<InMemoryEventBus>,
    epoch: u64,
    timer_id: u64,
    latency_ms: u64,
) {
    sleep(Duration::from_millis(latency_ms)).await;

    let Ok(mut guard) = inner.lock() else {
        return;
    };
    if !guard.connected || guard.epoch != epoch {
        return;
    }
    guard.pending.remove(&timer_id);

    let tx = generate_transaction(&mut rand::thread_rng());
    bus.publish_now(MonitorEvent::TransactionReceived(tx));
}

async fn chaos_loop(
    inner: Arc<Mutex<FeedInner>>,
    bus: Arc<InMemoryEventBus>,
    config: FeedConfig,
    epoch: u64,
) {
    loop {
        sleep(Duration::from_millis(config.chaos_interval_ms)).await;

        let stale = inner
            .lock()
            .map(|g| !g.connected || g.epoch != epoch)
            .unwrap_or(true);
        if stale {
            return;
        }

        let roll: f64 = rand::thread_rng().gen();
        if roll < config.chaos_probability {
            warn!("Chaos check forced a disconnect");
            disconnect_inner(&inner, &bus);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_bus::{EventFilter, Subscription};

    fn feed_with(config: FeedConfig) -> (MockFeed, Subscription) {
        let bus = Arc::new(InMemoryEventBus::new());
        let sub = bus.subscribe(EventFilter::all());
        (MockFeed::new(bus, config), sub)
    }

    fn drain(sub: &mut Subscription) -> Vec<MonitorEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = sub.try_recv() {
            events.push(event);
        }
        events
    }

    fn count_messages(events: &[MonitorEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, MonitorEvent::TransactionReceived(_)))
            .count()
    }

    // =========================================================================
    // EMISSION TESTS
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_burst_emits_expected_count() {
        let (feed, mut sub) = feed_with(FeedConfig::quiet(100, 5, 10));
        feed.connect();
        assert!(feed.is_connected());

        // One burst at t=100, five events firing at t=110.
        sleep(Duration::from_millis(120)).await;

        let events = drain(&mut sub);
        assert_eq!(count_messages(&events), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bursts_repeat_while_connected() {
        let (feed, mut sub) = feed_with(FeedConfig::quiet(100, 3, 10));
        feed.connect();

        // Three full burst cycles.
        sleep(Duration::from_millis(340)).await;

        let events = drain(&mut sub);
        assert_eq!(count_messages(&events), 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_is_idempotent() {
        let (feed, mut sub) = feed_with(FeedConfig::quiet(100, 4, 10));
        feed.connect();
        feed.connect();

        sleep(Duration::from_millis(120)).await;

        // A second connect must not double the burst schedule.
        assert_eq!(count_messages(&drain(&mut sub)), 4);
    }

    // =========================================================================
    // CANCELLATION TESTS
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_reports_all_pending_as_missed() {
        let (feed, mut sub) = feed_with(FeedConfig::quiet(100, 20, 200));
        feed.connect();

        // Burst scheduled at t=100; all 20 events pending until t=300.
        sleep(Duration::from_millis(150)).await;
        feed.disconnect();
        assert!(!feed.is_connected());

        // No ghost events after the disconnect notice.
        sleep(Duration::from_millis(500)).await;

        let events = drain(&mut sub);
        assert_eq!(count_messages(&events), 0);
        assert!(matches!(
            events.last(),
            Some(MonitorEvent::FeedDisconnected { missed: 20 })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivered_plus_missed_equals_burst_size() {
        let mut config = FeedConfig::quiet(100, 50, 0);
        config.event_latency_ms = 10..=250;
        let (feed, mut sub) = feed_with(config);
        feed.connect();

        // Stop mid-burst: some events fired, the rest still pending.
        sleep(Duration::from_millis(230)).await;
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        feed.disconnect();
        sleep(Duration::from_millis(500)).await;

        let events = drain(&mut sub);
        let delivered = count_messages(&events) as u64;
        let Some(MonitorEvent::FeedDisconnected { missed }) = events.last() else {
            panic!("expected disconnect notice last, got {events:?}");
        };
        assert_eq!(delivered + missed, 50);

        // Nothing may arrive after the disconnect notice.
        let after_disconnect = events
            .iter()
            .skip_while(|e| !matches!(e, MonitorEvent::FeedDisconnected { .. }))
            .skip(1)
            .count();
        assert_eq!(after_disconnect, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_when_idle_reports_zero_missed() {
        let (feed, mut sub) = feed_with(FeedConfig::quiet(1000, 5, 10));
        feed.connect();

        // Before the first burst there are no pending timers.
        sleep(Duration::from_millis(50)).await;
        feed.disconnect();

        let events = drain(&mut sub);
        assert!(matches!(
            events.last(),
            Some(MonitorEvent::FeedDisconnected { missed: 0 })
        ));
    }

    // =========================================================================
    // RECONNECT TESTS
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_reconnect_resumes_from_clean_state() {
        let (feed, mut sub) = feed_with(FeedConfig::quiet(100, 5, 50));
        feed.connect();
        sleep(Duration::from_millis(120)).await;
        feed.disconnect();
        drain(&mut sub);

        // Stale timers from the first epoch must never fire after this.
        feed.connect();
        sleep(Duration::from_millis(160)).await;

        let events = drain(&mut sub);
        assert_eq!(count_messages(&events), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chaos_disconnect_fires_with_certainty_one() {
        let mut config = FeedConfig::quiet(10_000, 5, 10);
        config.chaos_probability = 1.0;
        let (feed, mut sub) = feed_with(config);
        feed.connect();

        // First chaos check at t=3000 must force the disconnect.
        sleep(Duration::from_millis(3100)).await;

        assert!(!feed.is_connected());
        let events = drain(&mut sub);
        assert!(events
            .iter()
            .any(|e| matches!(e, MonitorEvent::FeedDisconnected { .. })));
    }
}
