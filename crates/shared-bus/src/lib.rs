//! # Shared Bus - Event Bus for Inter-Subsystem Communication
//!
//! All communication between the feed, the ingestion layer, the store and
//! the viewport flows through this bus. Subsystems never call each other
//! directly; they publish [`MonitorEvent`]s and subscribe with topic
//! filters. This keeps the producer fully decoupled from the fixed-rate
//! flush cadence on the consuming side.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │  tm-01-feed  │    publish()       │  tm-02-ingest│
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::{EventFilter, EventTopic, MonitorEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events buffered per subscriber before the oldest are dropped.
///
/// A full burst is at most 100 events and the flush drain runs every 80 ms,
/// so 1000 gives ample headroom before a subscriber lags.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
