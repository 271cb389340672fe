//! Viewport tuning.

/// Geometry and timing constants for the virtual window.
#[derive(Clone, Debug)]
pub struct ViewportConfig {
    /// Fixed row height in pixels.
    pub row_px: f64,

    /// Extra rows rendered above and below the visible span.
    pub overscan: usize,

    /// Scroll offsets below this count as "near the top" for auto-scroll.
    pub near_top_px: f64,

    /// How long a freshly prepended row stays highlighted.
    pub highlight_ms: i64,

    /// Upper bound on the prepend walk when collecting rows to highlight.
    pub highlight_walk_cap: usize,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            row_px: 48.0,
            overscan: 5,
            near_top_px: 120.0,
            highlight_ms: 1300,
            highlight_walk_cap: 120,
        }
    }
}
