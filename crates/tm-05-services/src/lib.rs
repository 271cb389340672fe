//! # Monitor Services
//!
//! The outward-facing conveniences around the store:
//!
//! - [`share_link`]: a compact query-string codec for filter criteria, so a
//!   view can be handed to someone else as a link.
//! - [`presets`]: named filter sets persisted to a JSON file.
//! - [`flag`]: the optimistic flag action with simulated latency and
//!   failure.
//! - [`related`]: ranked related-transaction lookup.

pub mod errors;
pub mod flag;
pub mod presets;
pub mod related;
pub mod share_link;

pub use errors::PresetError;
pub use flag::{flag_transaction, FlagConfig, FlagError};
pub use presets::{FilterPreset, PresetStore};
pub use related::{fetch_related, score_related, RelatedConfig};
