//! # Pipeline Integration
//!
//! Drives the full feed -> bus -> buffer -> store path under virtual time
//! and checks that everything the feed delivers lands in the store exactly
//! once, in arrival order, newest first.

#[cfg(test)]
mod tests {
    use crate::integration::harness::Harness;
    use std::collections::HashSet;
    use std::time::Duration;
    use tm_01_feed::FeedConfig;
    use tokio::time::sleep;

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_burst_lands_in_the_store() {
        let harness = Harness::new(FeedConfig::quiet(1000, 10, 5));
        harness.feed.connect();

        // Burst at t=1000, events at t=1005, flushed within 80 ms.
        sleep(Duration::from_millis(1100)).await;
        settle().await;

        assert_eq!(harness.store.len(), 10);
        assert!(harness.buffer.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sustained_flow_accumulates_without_duplicates() {
        let harness = Harness::new(FeedConfig::quiet(1000, 10, 5));
        harness.feed.connect();

        sleep(Duration::from_millis(3100)).await;
        settle().await;

        assert_eq!(harness.store.len(), 30);

        // Every id unique, every sequence number assigned exactly once.
        harness.store.read(|store| {
            let unique: HashSet<&String> = store.ordered_ids().iter().collect();
            assert_eq!(unique.len(), 30);
            let seqs: HashSet<u64> = store
                .ordered_ids()
                .iter()
                .map(|id| store.seq_of(id).unwrap())
                .collect();
            assert_eq!(seqs.len(), 30);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_holds_batches_and_resume_replays_them() {
        let harness = Harness::new(FeedConfig::quiet(1000, 10, 5));
        harness.store.toggle_paused();
        harness.feed.connect();

        sleep(Duration::from_millis(1200)).await;
        settle().await;

        // Flush ticks are no-ops while paused; the backlog waits in the
        // buffer.
        assert_eq!(harness.store.len(), 0);
        assert_eq!(harness.buffer.lock().unwrap().len(), 10);

        harness.store.toggle_paused();
        sleep(Duration::from_millis(100)).await;
        settle().await;

        assert_eq!(harness.store.len(), 10);
        assert!(harness.buffer.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_revision_advances_with_the_flow() {
        let harness = Harness::new(FeedConfig::quiet(1000, 5, 5));
        harness.feed.connect();

        sleep(Duration::from_millis(1100)).await;
        settle().await;
        let after_first = harness.store.revision();
        assert!(after_first > 0);

        sleep(Duration::from_millis(1000)).await;
        settle().await;
        assert!(harness.store.revision() > after_first);
    }
}
