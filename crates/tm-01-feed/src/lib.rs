//! # Simulated Transaction Feed
//!
//! A black-box producer honoring a small connect/disconnect/message
//! contract. While connected it emits transactions in bursts with per-event
//! network jitter, and a periodic chaos check occasionally forces a
//! disconnect so the downstream reconnection path stays honest.
//!
//! ## Contract
//!
//! - `connect()` / `disconnect()` / `is_connected()`
//! - messages and disconnect notices are published on the shared bus as
//!   `MonitorEvent::TransactionReceived` / `MonitorEvent::FeedDisconnected`
//!
//! ## Cancellation invariants
//!
//! - Disconnecting synchronously cancels the burst timer, the chaos timer
//!   and every pending per-event timer under one lock acquisition.
//! - Cancelled-but-unfired events are counted and reported as `missed`.
//! - No message is ever delivered after its disconnect notice: delivery and
//!   cancellation are serialized on the feed state lock, and every timer is
//!   stamped with the connection epoch it belongs to.

pub mod config;
pub mod domain;
pub mod service;

pub use config::FeedConfig;
pub use domain::generator::generate_transaction;
pub use service::MockFeed;
