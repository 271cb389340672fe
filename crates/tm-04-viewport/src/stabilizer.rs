//! The virtual window and its anchoring logic.

use crate::config::ViewportConfig;
use shared_types::{Millis, TimeSource};
use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;
use tracing::debug;

/// The slice of rows worth rendering, with their pixel placement.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleRange {
    /// Row indices to materialize (overscan included).
    pub rows: Range<usize>,
    /// Pixel offset of `rows.start` from the top of the full list.
    pub start_px: f64,
    /// Height of the full list in pixels.
    pub total_px: f64,
}

/// Virtual window over the filtered id list.
///
/// Holds its own copy of the ids so an update can be diffed against the
/// previous state for anchoring and highlighting. All scroll positions are
/// pixels from the top of the full (virtual) list.
pub struct Viewport {
    config: ViewportConfig,
    time: Arc<dyn TimeSource>,

    ids: Vec<String>,
    scroll_top: f64,
    height_px: f64,

    /// First id of the previous update, the stop marker for the prepend
    /// walk. `None` until the first non-empty update.
    prev_first_id: Option<String>,

    /// Highlighted ids with their expiry instants.
    highlights: HashMap<String, Millis>,
}

impl Viewport {
    pub fn new(config: ViewportConfig, time: Arc<dyn TimeSource>) -> Self {
        Self {
            config,
            time,
            ids: Vec::new(),
            scroll_top: 0.0,
            height_px: 0.0,
            prev_first_id: None,
            highlights: HashMap::new(),
        }
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    pub fn set_height(&mut self, height_px: f64) {
        self.height_px = height_px.max(0.0);
        self.clamp_scroll();
    }

    /// Scrolls to an absolute offset, clamped to the list bounds.
    pub fn scroll_to(&mut self, offset_px: f64) {
        self.scroll_top = offset_px;
        self.clamp_scroll();
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn total_px(&self) -> f64 {
        self.ids.len() as f64 * self.config.row_px
    }

    pub fn is_near_top(&self) -> bool {
        self.scroll_top < self.config.near_top_px
    }

    pub fn row_count(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    fn clamp_scroll(&mut self) {
        let max = (self.total_px() - self.height_px).max(0.0);
        self.scroll_top = self.scroll_top.clamp(0.0, max);
    }

    /// The rows intersecting the viewport, widened by the overscan.
    pub fn visible_range(&self) -> VisibleRange {
        if self.ids.is_empty() || self.height_px <= 0.0 {
            return VisibleRange {
                rows: 0..0,
                start_px: 0.0,
                total_px: self.total_px(),
            };
        }

        let row_px = self.config.row_px;
        let first_visible = (self.scroll_top / row_px).floor() as usize;
        let last_visible = ((self.scroll_top + self.height_px) / row_px).ceil() as usize;

        let start = first_visible.saturating_sub(self.config.overscan);
        let end = (last_visible + self.config.overscan).min(self.ids.len());

        VisibleRange {
            rows: start..end,
            start_px: start as f64 * row_px,
            total_px: self.total_px(),
        }
    }

    // ------------------------------------------------------------------
    // Updates
    // ------------------------------------------------------------------

    /// Applies a new snapshot of the filtered ids.
    ///
    /// With auto-scroll on and the view near the top, snaps to the newest
    /// row. Otherwise the top visible row is captured as an anchor (id plus
    /// pixel offset into the viewport) and restored after the swap; an
    /// anchor whose id no longer exists applies no correction.
    pub fn apply_update(&mut self, new_ids: Vec<String>, auto_scroll: bool) {
        let follow = auto_scroll && self.is_near_top();
        let anchor = if follow { None } else { self.capture_anchor() };

        self.collect_highlights(&new_ids);
        self.prev_first_id = new_ids.first().cloned();
        self.ids = new_ids;

        if follow {
            self.scroll_top = 0.0;
            return;
        }

        if let Some((anchor_id, offset)) = anchor {
            if let Some(index) = self.ids.iter().position(|id| *id == anchor_id) {
                self.scroll_top = index as f64 * self.config.row_px - offset;
            }
            // Anchor evicted: leave the offset alone.
        }
        self.clamp_scroll();
    }

    /// The top visible row and how far it sits above the viewport top.
    fn capture_anchor(&self) -> Option<(String, f64)> {
        let index = (self.scroll_top / self.config.row_px).floor() as usize;
        let id = self.ids.get(index)?.clone();
        let offset = index as f64 * self.config.row_px - self.scroll_top;
        Some((id, offset))
    }

    // ------------------------------------------------------------------
    // Highlights
    // ------------------------------------------------------------------

    /// Walks the new head until the previous first id, marking everything
    /// before it as freshly prepended. The walk is capped so a filter flip
    /// that replaces the whole list does not highlight thousands of rows.
    fn collect_highlights(&mut self, new_ids: &[String]) {
        let Some(prev_first) = self.prev_first_id.as_deref() else {
            return;
        };
        if new_ids.first().map(String::as_str) == Some(prev_first) {
            return;
        }

        let expiry = self.time.now_millis() + self.config.highlight_ms;
        let mut added = 0usize;
        for id in new_ids {
            if id == prev_first || added >= self.config.highlight_walk_cap {
                break;
            }
            self.highlights.insert(id.clone(), expiry);
            added += 1;
        }
        if added > 0 {
            debug!(added, "Highlighted prepended rows");
        }
    }

    /// Whether a row is currently highlighted.
    pub fn is_highlighted(&self, id: &str) -> bool {
        self.highlights
            .get(id)
            .is_some_and(|expiry| *expiry > self.time.now_millis())
    }

    /// Drops expired highlight entries.
    pub fn expire_highlights(&mut self) {
        let now = self.time.now_millis();
        self.highlights.retain(|_, expiry| *expiry > now);
    }

    pub fn highlight_count(&self) -> usize {
        let now = self.time.now_millis();
        self.highlights
            .values()
            .filter(|expiry| **expiry > now)
            .count()
    }
}
