//! # View-Layer Integration
//!
//! Filters, share links, flagging and the viewport exercised against live
//! pipeline data instead of hand-built fixtures.

#[cfg(test)]
mod tests {
    use crate::integration::harness::Harness;
    use shared_types::{MockTimeSource, RiskLevel, TimeSource};
    use std::sync::Arc;
    use std::time::Duration;
    use tm_01_feed::FeedConfig;
    use tm_03_store::PartialFilters;
    use tm_04_viewport::{Viewport, ViewportConfig};
    use tm_05_services::{flag_transaction, share_link, FlagConfig};
    use tokio::time::sleep;

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    async fn populated_harness(bursts: u64) -> Harness {
        let harness = Harness::new(FeedConfig::quiet(1000, 20, 5));
        harness.feed.connect();
        sleep(Duration::from_millis(bursts * 1000 + 100)).await;
        settle().await;
        harness
    }

    // =========================================================================
    // FILTERS ON LIVE DATA
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_live_filter_recompute_matches_predicate_exactly() {
        let harness = populated_harness(2).await;
        assert_eq!(harness.store.len(), 40);

        harness.store.set_filters(PartialFilters {
            risk: Some(RiskLevel::High),
            ..Default::default()
        });

        harness.store.read(|store| {
            let matching: Vec<&String> = store
                .ordered_ids()
                .iter()
                .filter(|id| store.filters().matches(store.get(id).unwrap()))
                .collect();
            let filtered: Vec<&String> = store.filtered_ids().iter().collect();
            assert_eq!(filtered, matching);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_incremental_view_survives_more_traffic_and_equals_rescan() {
        let harness = populated_harness(1).await;
        harness.store.set_filters(PartialFilters {
            risk: Some(RiskLevel::High),
            ..Default::default()
        });

        // Two more bursts maintained incrementally.
        sleep(Duration::from_millis(2000)).await;
        settle().await;
        assert_eq!(harness.store.len(), 60);

        let incremental = harness.store.filtered_ids();
        // An empty merge forces the full rescan path.
        harness.store.set_filters(PartialFilters::default());
        assert_eq!(harness.store.filtered_ids(), incremental);
    }

    // =========================================================================
    // SHARE LINKS
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_share_link_reproduces_the_live_view() {
        let harness = populated_harness(1).await;
        harness.store.set_filters(PartialFilters {
            amount_min: Some(Some(2000.0)),
            risk: Some(RiskLevel::Medium),
            ..Default::default()
        });
        let original_view = harness.store.filtered_ids();

        // Encode the current criteria, reset, then apply the decoded link.
        let link = share_link::encode(&harness.store.filters());
        harness.store.set_filters(PartialFilters {
            amount_min: Some(None),
            risk: Some(RiskLevel::All),
            ..Default::default()
        });
        assert_ne!(harness.store.filtered_ids().len(), original_view.len());

        harness.store.set_filters(share_link::decode(&link));
        assert_eq!(harness.store.filtered_ids(), original_view);
    }

    // =========================================================================
    // FLAGGING
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_flagging_a_live_row_sticks() {
        let harness = populated_harness(1).await;
        let id = harness.store.filtered_ids()[0].clone();

        let config = FlagConfig {
            failure_probability: 0.0,
            ..Default::default()
        };
        flag_transaction(&harness.store, &id, true, &config)
            .await
            .unwrap();

        assert_eq!(harness.store.get(&id).map(|t| t.flagged), Some(true));
    }

    // =========================================================================
    // VIEWPORT
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_viewport_stays_anchored_while_traffic_arrives() {
        let harness = populated_harness(1).await;

        let time = Arc::new(MockTimeSource::new(0));
        let mut viewport = Viewport::new(
            ViewportConfig::default(),
            Arc::clone(&time) as Arc<dyn TimeSource>,
        );
        viewport.set_height(480.0);

        let before = harness.store.filtered_ids();
        viewport.apply_update(before.clone(), false);
        viewport.scroll_to(480.0); // anchor on row 10, past the near-top band
        let anchor_id = before[10].clone();

        // Another burst prepends twenty rows.
        sleep(Duration::from_millis(1000)).await;
        settle().await;
        let after = harness.store.filtered_ids();
        assert_eq!(after.len(), before.len() + 20);
        viewport.apply_update(after.clone(), false);

        // Same row, same place on screen.
        let new_index = after.iter().position(|id| *id == anchor_id).unwrap();
        assert_eq!(viewport.scroll_top(), new_index as f64 * 48.0);

        // The prepended rows are highlighted until their flash expires.
        assert_eq!(viewport.highlight_count(), 20);
        time.advance(1301);
        assert_eq!(viewport.highlight_count(), 0);
    }
}
