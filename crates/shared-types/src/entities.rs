//! Domain entities for the transaction monitor.
//!
//! A [`Transaction`] is immutable once produced, with one exception: the
//! `flagged` field, which is owned by the flag action and toggled through
//! the store. Transactions are never deleted individually; the store evicts
//! them in bulk when its capacity is exceeded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable display ordinal assigned once per unique transaction id at first
/// sight. Never reassigned, never reused.
pub type SeqNo = u64;

/// One of the four supported currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "IQD")]
    Iqd,
    #[serde(rename = "GBP")]
    Gbp,
}

impl Currency {
    /// All currency codes, in wire order.
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Iqd, Currency::Gbp];

    /// Wire representation (`"USD"`, `"EUR"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Iqd => "IQD",
            Currency::Gbp => "GBP",
        }
    }

    /// Parses a wire code. Unknown codes yield `None` rather than an error;
    /// tolerant callers (share links, presets) drop them silently.
    pub fn parse(s: &str) -> Option<Currency> {
        match s {
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            "IQD" => Some(Currency::Iqd),
            "GBP" => Some(Currency::Gbp),
            _ => None,
        }
    }
}

/// Processing status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl TxStatus {
    /// All statuses, in wire order.
    pub const ALL: [TxStatus; 4] = [
        TxStatus::Pending,
        TxStatus::Processing,
        TxStatus::Completed,
        TxStatus::Failed,
    ];

    /// Wire representation (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Pending => "pending",
            TxStatus::Processing => "processing",
            TxStatus::Completed => "completed",
            TxStatus::Failed => "failed",
        }
    }

    /// Parses a wire value; unknown values yield `None`.
    pub fn parse(s: &str) -> Option<TxStatus> {
        match s {
            "pending" => Some(TxStatus::Pending),
            "processing" => Some(TxStatus::Processing),
            "completed" => Some(TxStatus::Completed),
            "failed" => Some(TxStatus::Failed),
            _ => None,
        }
    }
}

/// Three-way risk classification derived from a 0..=100 score.
///
/// Thresholds: low `[0, 34)`, medium `[34, 67)`, high `[67, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    All,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Bucket boundary between low and medium.
    pub const MEDIUM_FLOOR: u8 = 34;
    /// Bucket boundary between medium and high.
    pub const HIGH_FLOOR: u8 = 67;

    /// Returns whether `score` falls in this level's bucket.
    /// `All` matches every score.
    pub fn matches(&self, score: u8) -> bool {
        match self {
            RiskLevel::All => true,
            RiskLevel::Low => score < Self::MEDIUM_FLOOR,
            RiskLevel::Medium => score >= Self::MEDIUM_FLOOR && score < Self::HIGH_FLOOR,
            RiskLevel::High => score >= Self::HIGH_FLOOR,
        }
    }

    /// Buckets a score into its non-`All` level.
    pub fn bucket(score: u8) -> RiskLevel {
        if score < Self::MEDIUM_FLOOR {
            RiskLevel::Low
        } else if score < Self::HIGH_FLOOR {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::All => "all",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Parses a wire value; unknown values yield `None`.
    pub fn parse(s: &str) -> Option<RiskLevel> {
        match s {
            "all" => Some(RiskLevel::All),
            "low" => Some(RiskLevel::Low),
            "medium" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

/// A counterparty: opaque id plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: String,
    pub name: String,
}

/// A single monitored transaction.
///
/// Produced fully populated by the feed. `id` is unique and opaque;
/// `risk_score` is always within 0..=100; `amount` is non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub amount: f64,
    pub currency: Currency,
    pub sender: Party,
    pub receiver: Party,
    pub status: TxStatus,
    #[serde(rename = "riskScore")]
    pub risk_score: u8,
    #[serde(default)]
    pub flagged: bool,
}

/// Connection lifecycle as seen by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Reconnecting,
    Disconnected,
}
