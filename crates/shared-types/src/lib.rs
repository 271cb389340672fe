//! # Shared Types - Core Entities
//!
//! Entity definitions shared by every Transaction-Monitor subsystem.
//!
//! All inter-subsystem payloads are defined here so that the feed, the
//! ingestion layer, the store and the viewport agree on one vocabulary.
//! Subsystem-specific types (filter criteria, buffer configs, window
//! geometry) live in their owning crates.

pub mod entities;
pub mod time;

pub use entities::{
    ConnectionStatus, Currency, Party, RiskLevel, SeqNo, Transaction, TxStatus,
};
pub use time::{Millis, MockTimeSource, SystemTimeSource, TimeSource};
