//! Shared wiring for the integration tests.
//!
//! Builds the same topology as the runtime (feed, pump, flush scheduler,
//! reconnect supervisor, store) on the current test runtime, with a quiet
//! feed configuration so virtual time drives everything deterministically.

use shared_bus::{EventFilter, EventTopic, InMemoryEventBus};
use shared_types::{ConnectionStatus, Transaction};
use std::sync::{Arc, Mutex};
use tm_01_feed::{FeedConfig, MockFeed};
use tm_02_ingest::{
    reconnect, scheduler, BatchSink, FeedControl, IngestBuffer, IngestConfig, ReconnectConfig,
};
use tm_03_store::{StoreConfig, StoreService};
use tokio::task::JoinHandle;

/// Adapts the store to the ingestion layer's sink port, as the runtime does.
pub struct StoreSink(pub Arc<StoreService>);

impl BatchSink for StoreSink {
    fn apply_batch(&self, batch: Vec<Transaction>) {
        self.0.ingest_batch(batch);
    }

    fn record_missed(&self, count: u64) {
        self.0.add_missed(count);
    }

    fn set_connection(&self, status: ConnectionStatus) {
        self.0.set_connection_status(status);
    }

    fn is_paused(&self) -> bool {
        self.0.ui().paused
    }
}

pub struct FeedConnector(pub Arc<MockFeed>);

impl FeedControl for FeedConnector {
    fn connect(&self) {
        self.0.connect();
    }
}

pub struct Harness {
    pub bus: Arc<InMemoryEventBus>,
    pub feed: Arc<MockFeed>,
    pub store: Arc<StoreService>,
    pub buffer: Arc<Mutex<IngestBuffer>>,
    tasks: Vec<JoinHandle<()>>,
}

impl Harness {
    /// Wires the full pipeline with the given feed configuration. The feed
    /// is not yet connected.
    pub fn new(feed_config: FeedConfig) -> Self {
        let bus = Arc::new(InMemoryEventBus::with_capacity(8192));
        let feed = Arc::new(MockFeed::new(Arc::clone(&bus), feed_config));
        let store = Arc::new(StoreService::new(
            StoreConfig::default(),
            Arc::clone(&bus),
        ));
        let buffer = Arc::new(Mutex::new(IngestBuffer::new(
            IngestConfig::default().max_buffer,
        )));

        let sink: Arc<dyn BatchSink> = Arc::new(StoreSink(Arc::clone(&store)));
        let feed_control: Arc<dyn FeedControl> = Arc::new(FeedConnector(Arc::clone(&feed)));

        let tasks = vec![
            tokio::spawn(scheduler::pump(
                bus.subscribe(EventFilter::topics(vec![EventTopic::Feed])),
                Arc::clone(&buffer),
                Arc::clone(&sink),
            )),
            tokio::spawn(scheduler::run_flush(
                Arc::clone(&buffer),
                Arc::clone(&sink),
                IngestConfig::default(),
            )),
            tokio::spawn(reconnect::supervise(
                bus.subscribe(EventFilter::topics(vec![EventTopic::Feed])),
                feed_control,
                Arc::clone(&sink),
                ReconnectConfig::default(),
            )),
        ];

        Self {
            bus,
            feed,
            store,
            buffer,
            tasks,
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
