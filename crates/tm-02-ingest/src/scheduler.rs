//! Flush scheduler and feed pump.
//!
//! Two long-running tasks:
//! - [`pump`] moves messages from the bus subscription into the buffer as
//!   they arrive, crediting overflow drops to the missed counter.
//! - [`run_flush`] drains the whole buffer into one batch per tick and
//!   applies it to the sink in a single step.
//!
//! The buffer is owned here; the sink only ever sees immutable batches, so
//! there is no shared read/write surface between the two sides.

use crate::buffer::IngestBuffer;
use crate::config::IngestConfig;
use crate::ports::BatchSink;
use shared_bus::{MonitorEvent, Subscription};
use std::sync::{Arc, Mutex};
use tokio::time::{interval, Duration};
use tracing::{debug, warn};

/// Moves feed messages into the buffer until the subscription closes.
pub async fn pump(
    mut sub: Subscription,
    buffer: Arc<Mutex<IngestBuffer>>,
    sink: Arc<dyn BatchSink>,
) {
    while let Some(event) = sub.recv().await {
        let MonitorEvent::TransactionReceived(tx) = event else {
            continue;
        };

        let dropped = {
            let Ok(mut buffer) = buffer.lock() else {
                return;
            };
            buffer.push(tx)
        };

        if dropped > 0 {
            warn!(dropped, "Ingestion buffer overflow, oldest entries dropped");
            sink.record_missed(dropped);
        }
    }
    debug!("Feed pump stopped: bus closed");
}

/// Applies one flush tick: no-op while paused, otherwise drain-all and
/// apply. Split out so tests can drive ticks directly.
pub fn flush_once(buffer: &Mutex<IngestBuffer>, sink: &dyn BatchSink) {
    if sink.is_paused() {
        return;
    }

    let batch = {
        let Ok(mut buffer) = buffer.lock() else {
            return;
        };
        if buffer.is_empty() {
            return;
        }
        buffer.drain()
    };

    debug!(batch_len = batch.len(), "Flushing batch to store");
    sink.apply_batch(batch);
}

/// Runs the periodic flush tick until the task is cancelled.
pub async fn run_flush(
    buffer: Arc<Mutex<IngestBuffer>>,
    sink: Arc<dyn BatchSink>,
    config: IngestConfig,
) {
    let mut tick = interval(Duration::from_millis(config.flush_interval_ms));
    loop {
        tick.tick().await;
        flush_once(&buffer, sink.as_ref());
    }
}
