//! # Resilience Integration
//!
//! Disconnects, the reconnection supervisor and missed-event accounting,
//! end to end: every event the feed generates is either in the store or in
//! the missed counter, never silently gone.

#[cfg(test)]
mod tests {
    use crate::integration::harness::Harness;
    use shared_types::ConnectionStatus;
    use std::time::Duration;
    use tm_01_feed::FeedConfig;
    use tokio::time::sleep;

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_counts_pending_and_supervisor_reconnects() {
        // Long per-event latency so a whole burst is pending at the cut.
        let harness = Harness::new(FeedConfig::quiet(1000, 10, 500));
        harness.feed.connect();

        // Burst scheduled at t=1000; all ten timers fire at t=1500.
        sleep(Duration::from_millis(1100)).await;
        settle().await;
        harness.feed.disconnect();
        settle().await;

        // The losses are visible and the supervisor is in its backoff.
        assert_eq!(harness.store.ui().missed_count, 10);
        assert_eq!(
            harness.store.ui().connection_status,
            ConnectionStatus::Reconnecting
        );
        assert!(!harness.feed.is_connected());
        assert_eq!(harness.store.len(), 0);

        // First attempt waits 1000 ms.
        sleep(Duration::from_millis(1100)).await;
        settle().await;
        assert!(harness.feed.is_connected());
        assert_eq!(
            harness.store.ui().connection_status,
            ConnectionStatus::Connected
        );

        // The next burst flows into the store again.
        sleep(Duration::from_millis(1600)).await;
        settle().await;
        assert_eq!(harness.store.len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chaos_disconnect_recovers_automatically() {
        let mut config = FeedConfig::quiet(10_000, 5, 10);
        config.chaos_probability = 1.0;
        let harness = Harness::new(config);
        harness.feed.connect();

        // Chaos check cuts the feed at t=3000.
        sleep(Duration::from_millis(3100)).await;
        settle().await;
        assert!(!harness.feed.is_connected());

        // Supervisor brings it back after the base delay.
        sleep(Duration::from_millis(1100)).await;
        settle().await;
        assert!(harness.feed.is_connected());
        assert_eq!(
            harness.store.ui().connection_status,
            ConnectionStatus::Connected
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_missed_accumulates_across_disconnects_until_reset() {
        let harness = Harness::new(FeedConfig::quiet(1000, 8, 500));
        harness.feed.connect();

        for _ in 0..2 {
            // Catch each burst mid-flight, then let the supervisor
            // reconnect and wait out the next burst interval.
            sleep(Duration::from_millis(1100)).await;
            settle().await;
            harness.feed.disconnect();
            settle().await;
            sleep(Duration::from_millis(1100)).await;
            settle().await;
        }

        assert_eq!(harness.store.ui().missed_count, 16);

        harness.store.reset_missed();
        assert_eq!(harness.store.ui().missed_count, 0);
    }
}
