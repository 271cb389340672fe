//! Port implementations connecting the ingestion layer to the store and
//! the feed.

use shared_types::{ConnectionStatus, Transaction};
use std::sync::Arc;
use tm_01_feed::MockFeed;
use tm_02_ingest::{BatchSink, FeedControl};
use tm_03_store::StoreService;

/// Lets the ingestion layer apply batches and counters to the store.
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

/// Lets the reconnection supervisor drive the feed.
pub struct FeedConnector(pub Arc<MockFeed>);

impl FeedControl for FeedConnector {
    fn connect(&self) {
        self.0.connect();
    }
}
