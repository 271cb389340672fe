//! Optimistic flagging with simulated latency and failure.
//!
//! The flag is applied to the store immediately, then the (simulated)
//! remote action runs. Success keeps the speculative value; failure puts
//! the previous value back. Either way the store is settled by the time
//! the future resolves.

use rand::Rng;
use std::time::Duration;
use thiserror::Error;
use tm_03_store::StoreService;
use tokio::time::sleep;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum FlagError {
    #[error("Failed to flag transaction {0}")]
    Failed(String),
}

/// Latency and failure tuning for the simulated flag action.
#[derive(Clone, Debug)]
pub struct FlagConfig {
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
    /// Chance of the action failing, 0.0..=1.0.
    pub failure_probability: f64,
}

impl Default for FlagConfig {
    fn default() -> Self {
        Self {
            min_latency_ms: 250,
            max_latency_ms: 900,
            failure_probability: 0.1,
        }
    }
}

/// Flags or unflags a transaction through the two-phase optimistic path.
///
/// Unknown ids resolve to `Ok` without doing anything; the row may simply
/// have been evicted since the user clicked.
pub async fn flag_transaction(
    store: &StoreService,
    id: &str,
    flagged: bool,
    config: &FlagConfig,
) -> Result<(), FlagError> {
    let Some(previous) = store.get(id).map(|tx| tx.flagged) else {
        debug!(id, "Flag target no longer present, skipping");
        return Ok(());
    };

    store.set_flagged(id, flagged);

    let (delay_ms, fail) = {
        let mut rng = rand::thread_rng();
        (
            rng.gen_range(config.min_latency_ms..=config.max_latency_ms),
            rng.gen::<f64>() < config.failure_probability,
        )
    };
    sleep(Duration::from_millis(delay_ms)).await;

    if fail {
        warn!(id, "Flag action failed, rolling back");
        store.set_flagged(id, previous);
        return Err(FlagError::Failed(id.to_string()));
    }
    Ok(())
}
