//! Subsystem container and configuration.

use shared_bus::InMemoryEventBus;
use shared_types::SystemTimeSource;
use std::sync::{Arc, Mutex};
use tm_01_feed::{FeedConfig, MockFeed};
use tm_02_ingest::{IngestBuffer, IngestConfig, ReconnectConfig};
use tm_03_store::{StoreConfig, StoreService};
use tm_04_viewport::{Viewport, ViewportConfig};
use tracing::info;

/// All tunables in one place. Defaults match the documented constants;
/// `load_config` in `main` applies `TM_*` environment overrides.
#[derive(Clone, Debug, Default)]
pub struct MonitorConfig {
    pub feed: FeedConfig,
    pub ingest: IngestConfig,
    pub reconnect: ReconnectConfig,
    pub store: StoreConfig,
    pub viewport: ViewportConfig,
}

/// Holds the shared infrastructure and every initialized subsystem.
pub struct MonitorContainer {
    pub config: MonitorConfig,
    pub bus: Arc<InMemoryEventBus>,
    pub feed: Arc<MockFeed>,
    pub store: Arc<StoreService>,
    pub buffer: Arc<Mutex<IngestBuffer>>,
    pub viewport: Arc<Mutex<Viewport>>,
}

impl MonitorContainer {
    pub fn new(config: MonitorConfig) -> Self {
        info!("Initializing monitor subsystems");

        let bus = Arc::new(InMemoryEventBus::new());
        let feed = Arc::new(MockFeed::new(Arc::clone(&bus), config.feed.clone()));
        let store = Arc::new(StoreService::new(config.store.clone(), Arc::clone(&bus)));
        let buffer = Arc::new(Mutex::new(IngestBuffer::new(config.ingest.max_buffer)));
        let viewport = Arc::new(Mutex::new(Viewport::new(
            config.viewport.clone(),
            Arc::new(SystemTimeSource),
        )));

        Self {
            config,
            bus,
            feed,
            store,
            buffer,
            viewport,
        }
    }
}
