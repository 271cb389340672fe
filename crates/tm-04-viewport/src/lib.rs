//! # Viewport Stabilizer
//!
//! A virtualized window over the filtered id list. Rows are fixed height;
//! only the rows intersecting the viewport (plus overscan) are ever
//! materialized. The stabilizer's job is to keep what the reader is looking
//! at perfectly still while new rows land above it:
//!
//! ```text
//!        new rows prepend here
//!  ┌─────────────────────────────┐ ─┐
//!  │  (rows above the viewport)  │  │ scroll_top grows by the
//!  ├─────────────────────────────┤ ─┘ prepended height
//!  │  anchor row  ← same id at   │
//!  │                same offset  │
//!  │  ...visible rows...         │
//!  └─────────────────────────────┘
//! ```
//!
//! With auto-scroll on and the view near the top, the window snaps to the
//! newest row instead. Freshly prepended rows are highlighted briefly so
//! arrivals are visible without motion.

pub mod config;
pub mod stabilizer;

pub use config::ViewportConfig;
pub use stabilizer::{Viewport, VisibleRange};
