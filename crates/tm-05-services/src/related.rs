//! Related-transaction lookup.
//!
//! Ranks a candidate pool against a source transaction by shared
//! attributes. Party identity weighs most, names and currency less,
//! status and risk bucket least. Only positively scored candidates are
//! related at all.

use rand::Rng;
use shared_types::{RiskLevel, Transaction};
use std::time::Duration;
use tokio::time::sleep;

/// Latency and result-size tuning for the simulated lookup.
#[derive(Clone, Debug)]
pub struct RelatedConfig {
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
    /// Maximum number of results.
    pub limit: usize,
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            min_latency_ms: 300,
            max_latency_ms: 800,
            limit: 8,
        }
    }
}

/// Affinity score between a source and a candidate. The source itself
/// scores negative so it can never rank.
pub fn score_related(source: &Transaction, candidate: &Transaction) -> i32 {
    if source.id == candidate.id {
        return -1;
    }

    let mut score = 0;
    if source.sender.id == candidate.sender.id {
        score += 5;
    }
    if source.receiver.id == candidate.receiver.id {
        score += 5;
    }
    if source.sender.name == candidate.sender.name {
        score += 2;
    }
    if source.receiver.name == candidate.receiver.name {
        score += 2;
    }
    if source.currency == candidate.currency {
        score += 2;
    }
    if source.status == candidate.status {
        score += 1;
    }
    if RiskLevel::bucket(source.risk_score) == RiskLevel::bucket(candidate.risk_score) {
        score += 1;
    }
    score
}

/// Ranks `pool` against `source` and returns the top matches after a
/// simulated lookup delay.
pub async fn fetch_related(
    source: &Transaction,
    pool: &[Transaction],
    config: &RelatedConfig,
) -> Vec<Transaction> {
    let delay_ms = rand::thread_rng().gen_range(config.min_latency_ms..=config.max_latency_ms);
    sleep(Duration::from_millis(delay_ms)).await;

    let mut ranked: Vec<(i32, &Transaction)> = pool
        .iter()
        .map(|tx| (score_related(source, tx), tx))
        .filter(|(score, _)| *score > 0)
        .collect();
    // Stable sort keeps pool order among equal scores.
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    ranked
        .into_iter()
        .take(config.limit)
        .map(|(_, tx)| tx.clone())
        .collect()
}
