//! # Transaction-Monitor Runtime
//!
//! The main entry point wiring every subsystem into a running monitor.
//!
//! ## Architecture
//!
//! ```text
//! MockFeed (tm-01) ──TransactionReceived──→ Event Bus
//!        │                                      │
//!        │ FeedDisconnected                     ↓
//!        │                          pump → IngestBuffer (tm-02)
//!        ↓                                      │ 80 ms flush
//! Reconnect supervisor ──connect()──┐           ↓
//!        │                          │    StoreService (tm-03)
//!        └──missed / status─────────┴──────────→│
//!                                               │ StoreUpdated
//!                                               ↓
//!                                     Viewport / services (tm-04/05)
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (`TM_*` environment overrides)
//! 2. Build the container (bus, feed, store, buffer)
//! 3. Spawn the pump, the flush scheduler and the reconnect supervisor
//! 4. Connect the feed
//! 5. Run until Ctrl+C, then signal shutdown

pub mod adapters;
pub mod container;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::adapters::{FeedConnector, StoreSink};
use crate::container::{MonitorConfig, MonitorContainer};
use shared_bus::{EventFilter, EventTopic};
use tm_02_ingest::{reconnect, scheduler, BatchSink, FeedControl};

/// The main runtime orchestrating all subsystems.
pub struct MonitorRuntime {
    container: Arc<MonitorContainer>,
    shutdown_tx: tokio::sync::watch::Sender<bool>,
    shutdown_rx: tokio::sync::watch::Receiver<bool>,
}

impl MonitorRuntime {
    pub fn new(config: MonitorConfig) -> Self {
        info!("Creating transaction monitor runtime");

        let container = Arc::new(MonitorContainer::new(config));
        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

        Self {
            container,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Spawns the long-running tasks and connects the feed.
    pub fn start(&self) {
        let container = &self.container;
        let sink: Arc<dyn BatchSink> = Arc::new(StoreSink(Arc::clone(&container.store)));
        let feed_control: Arc<dyn FeedControl> =
            Arc::new(FeedConnector(Arc::clone(&container.feed)));

        // Feed pump: bus -> buffer.
        let pump = scheduler::pump(
            container.bus.subscribe(EventFilter::topics(vec![EventTopic::Feed])),
            Arc::clone(&container.buffer),
            Arc::clone(&sink),
        );
        let mut pump_shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = pump => {}
                _ = pump_shutdown.changed() => {
                    info!("[ingest] Shutdown signal received");
                }
            }
        });

        // Flush scheduler: buffer -> store.
        let flush = scheduler::run_flush(
            Arc::clone(&container.buffer),
            Arc::clone(&sink),
            container.config.ingest.clone(),
        );
        let mut flush_shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = flush => {}
                _ = flush_shutdown.changed() => {
                    info!("[flush] Shutdown signal received");
                }
            }
        });

        // Reconnect supervisor: disconnect notices -> backoff -> connect.
        let supervisor = reconnect::supervise(
            container.bus.subscribe(EventFilter::topics(vec![EventTopic::Feed])),
            feed_control,
            sink,
            container.config.reconnect.clone(),
        );
        let mut supervisor_shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = supervisor => {}
                _ = supervisor_shutdown.changed() => {
                    info!("[reconnect] Shutdown signal received");
                }
            }
        });

        // View task: refresh the virtual window on every store revision.
        let mut store_events = container.bus.subscribe(EventFilter::topics(vec![EventTopic::Store]));
        let view_store = Arc::clone(&container.store);
        let view = Arc::clone(&container.viewport);
        let mut view_shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    event = store_events.recv() => {
                        if event.is_none() {
                            break;
                        }
                        let ids = view_store.filtered_ids();
                        let auto_scroll = view_store.ui().auto_scroll;
                        let mut viewport = match view.lock() {
                            Ok(guard) => guard,
                            Err(poisoned) => poisoned.into_inner(),
                        };
                        viewport.apply_update(ids, auto_scroll);
                        viewport.expire_highlights();
                    }
                    _ = view_shutdown.changed() => {
                        info!("[viewport] Shutdown signal received");
                        break;
                    }
                }
            }
        });

        container.feed.connect();
        container
            .store
            .set_connection_status(shared_types::ConnectionStatus::Connected);

        info!("All subsystems running");
    }

    /// Signals shutdown and gives the tasks a moment to wind down.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        self.container.feed.disconnect();
        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }
        tokio::time::sleep(Duration::from_millis(200)).await;

        info!("Shutdown complete");
    }

    pub fn container(&self) -> Arc<MonitorContainer> {
        Arc::clone(&self.container)
    }
}

/// Load configuration from the environment.
fn load_config() -> MonitorConfig {
    let mut config = MonitorConfig::default();

    if let Ok(value) = std::env::var("TM_MAX_BUFFER") {
        if let Ok(parsed) = value.parse() {
            config.ingest.max_buffer = parsed;
        }
    }
    if let Ok(value) = std::env::var("TM_FLUSH_INTERVAL_MS") {
        if let Ok(parsed) = value.parse() {
            config.ingest.flush_interval_ms = parsed;
        }
    }
    if let Ok(value) = std::env::var("TM_MAX_KEEP") {
        if let Ok(parsed) = value.parse() {
            config.store.max_keep = parsed;
        }
    }
    if let Ok(value) = std::env::var("TM_CHAOS_PROBABILITY") {
        if let Ok(parsed) = value.parse::<f64>() {
            if (0.0..=1.0).contains(&parsed) {
                config.feed.chaos_probability = parsed;
            }
        }
    }

    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    let config = load_config();

    let runtime = MonitorRuntime::new(config);
    runtime.start();

    info!("Monitor is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    runtime.shutdown().await;

    Ok(())
}
