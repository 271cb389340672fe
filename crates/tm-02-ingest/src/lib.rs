//! # Ingestion Layer
//!
//! Decouples arbitrarily bursty arrival from the fixed-rate application of
//! updates to the store:
//!
//! ```text
//! feed ──bus──→ pump ──→ IngestBuffer ──80 ms tick──→ BatchSink (store)
//!                          (max 5000,
//!                           drop oldest)
//! ```
//!
//! - [`buffer::IngestBuffer`] accumulates events between flush ticks and
//!   enforces the drop-oldest overflow policy, reporting every drop so the
//!   missed counter stays truthful.
//! - [`scheduler`] drains the whole buffer into one batch per tick; while
//!   paused the tick is a no-op and the buffer keeps absorbing (bounded), so
//!   resuming replays the most recent backlog.
//! - [`reconnect`] supervises disconnect notices with a linear, capped
//!   backoff and drives the feed back to connected.
//!
//! The store and the feed are reached only through the outbound ports in
//! [`ports`]; this crate never touches their internals.

pub mod buffer;
pub mod config;
pub mod ports;
pub mod reconnect;
pub mod scheduler;

pub use buffer::IngestBuffer;
pub use config::{IngestConfig, ReconnectConfig};
pub use ports::{BatchSink, FeedControl};
pub use reconnect::ReconnectController;
