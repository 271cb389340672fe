//! # Monitor Events
//!
//! Defines all event types that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::{ConnectionStatus, Transaction};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MonitorEvent {
    // =========================================================================
    // FEED (tm-01)
    // =========================================================================
    /// A transaction arrived from the feed.
    /// Source: tm-01-feed | Target: tm-02-ingest
    TransactionReceived(Transaction),

    /// The feed disconnected (chaos or explicit). `missed` counts per-event
    /// timers that were cancelled before firing.
    /// Source: tm-01-feed | Target: tm-02-ingest
    FeedDisconnected {
        /// Events generated but never delivered in this disconnect.
        missed: u64,
    },

    // =========================================================================
    // STORE (tm-03)
    // =========================================================================
    /// The store applied a mutating operation. The revision increases by one
    /// per mutation; consumers re-read through the store's accessors.
    StoreUpdated {
        /// Monotone mutation counter.
        revision: u64,
    },

    // =========================================================================
    // CONNECTION (tm-02)
    // =========================================================================
    /// The reconnection controller changed state.
    ConnectionChanged(ConnectionStatus),
}

impl MonitorEvent {
    /// The topic this event belongs to.
    pub fn topic(&self) -> EventTopic {
        match self {
            MonitorEvent::TransactionReceived(_) | MonitorEvent::FeedDisconnected { .. } => {
                EventTopic::Feed
            }
            MonitorEvent::StoreUpdated { .. } => EventTopic::Store,
            MonitorEvent::ConnectionChanged(_) => EventTopic::Connection,
        }
    }
}

/// Coarse routing topics for subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTopic {
    Feed,
    Store,
    Connection,
}

/// Filter describing which events a subscriber wants.
///
/// An empty topic list matches everything.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Matches all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches only the given topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Whether the event passes this filter.
    pub fn matches(&self, event: &MonitorEvent) -> bool {
        self.topics.is_empty() || self.topics.contains(&event.topic())
    }
}
