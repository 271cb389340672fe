//! Reconnection supervision.
//!
//! Backoff is linear and capped: attempt `n` waits `min(base * n, max)`
//! milliseconds. A successful connection resets the counter, so a stable
//! feed always pays the base delay on its next drop.

use crate::config::ReconnectConfig;
use crate::ports::{BatchSink, FeedControl};
use shared_bus::{MonitorEvent, Subscription};
use shared_types::ConnectionStatus;
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

/// Pure backoff state machine. The async loop in [`supervise`] drives it;
/// tests can exercise the delay schedule without a runtime.
#[derive(Debug, Default)]
pub struct ReconnectController {
    attempt: u32,
    config: ReconnectConfig,
}

impl ReconnectController {
    pub fn new(config: ReconnectConfig) -> Self {
        Self { attempt: 0, config }
    }

    /// Registers a disconnect and returns how long to wait before the next
    /// connection attempt.
    pub fn on_disconnect(&mut self) -> Duration {
        self.attempt += 1;
        let delay_ms = (self.config.base_delay_ms * u64::from(self.attempt))
            .min(self.config.max_delay_ms);
        Duration::from_millis(delay_ms)
    }

    /// Resets the schedule after a successful connection.
    pub fn on_connected(&mut self) {
        self.attempt = 0;
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}

/// Reacts to disconnect notices: records the reported losses, walks the UI
/// through `Disconnected -> Reconnecting -> Connected`, and calls back into
/// the feed after the backoff delay. Runs until the subscription closes.
pub async fn supervise(
    mut sub: Subscription,
    feed: Arc<dyn FeedControl>,
    sink: Arc<dyn BatchSink>,
    config: ReconnectConfig,
) {
    let mut controller = ReconnectController::new(config);

    while let Some(event) = sub.recv().await {
        let MonitorEvent::FeedDisconnected { missed } = event else {
            continue;
        };

        if missed > 0 {
            warn!(missed, "Feed dropped with undelivered events");
            sink.record_missed(missed);
        }
        sink.set_connection(ConnectionStatus::Disconnected);

        let delay = controller.on_disconnect();
        info!(
            attempt = controller.attempt(),
            delay_ms = delay.as_millis() as u64,
            "Scheduling reconnection"
        );
        sink.set_connection(ConnectionStatus::Reconnecting);
        sleep(delay).await;

        feed.connect();
        controller.on_connected();
        sink.set_connection(ConnectionStatus::Connected);
    }
    debug!("Reconnect supervisor stopped: bus closed");
}
