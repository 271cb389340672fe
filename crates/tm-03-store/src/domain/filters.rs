//! Filter criteria and the pure matching predicate.
//!
//! The predicate is a conjunction: a transaction passes only if every
//! configured constraint accepts it. Unset fields constrain nothing.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use shared_types::{Currency, RiskLevel, Transaction, TxStatus};

/// The full set of filter constraints.
///
/// `Default` is the unconstrained state: everything matches.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Inclusive lower amount bound.
    pub amount_min: Option<f64>,
    /// Inclusive upper amount bound.
    pub amount_max: Option<f64>,
    /// Inclusive first calendar day (UTC).
    pub date_from: Option<NaiveDate>,
    /// Inclusive last calendar day (UTC); expands to the day's 23:59:59.
    pub date_to: Option<NaiveDate>,
    /// Accepted statuses; empty means any.
    #[serde(default)]
    pub statuses: Vec<TxStatus>,
    /// Accepted currencies; empty means any.
    #[serde(default)]
    pub currencies: Vec<Currency>,
    /// Risk bucket; `All` means any.
    #[serde(default)]
    pub risk: RiskLevel,
    /// Case-insensitive substring over id and party fields.
    #[serde(default)]
    pub search_query: String,
}

impl FilterCriteria {
    /// Returns whether `tx` satisfies every configured constraint.
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(min) = self.amount_min {
            if tx.amount < min {
                return false;
            }
        }
        if let Some(max) = self.amount_max {
            if tx.amount > max {
                return false;
            }
        }

        if let Some(from) = self.date_from {
            let start = from.and_time(NaiveTime::MIN).and_utc();
            if tx.timestamp < start {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            // The bound is the whole calendar day, so compare against its
            // last second. and_hms_opt cannot fail for 23:59:59.
            if let Some(end) = to.and_hms_opt(23, 59, 59) {
                if tx.timestamp > end.and_utc() {
                    return false;
                }
            }
        }

        if !self.statuses.is_empty() && !self.statuses.contains(&tx.status) {
            return false;
        }
        if !self.currencies.is_empty() && !self.currencies.contains(&tx.currency) {
            return false;
        }

        if !self.risk.matches(tx.risk_score) {
            return false;
        }

        let query = self.search_query.trim().to_lowercase();
        if !query.is_empty() {
            let haystack = format!(
                "{} {} {} {} {}",
                tx.id, tx.sender.name, tx.receiver.name, tx.sender.id, tx.receiver.id
            )
            .to_lowercase();
            if !haystack.contains(&query) {
                return false;
            }
        }

        true
    }
}

/// A partial update to [`FilterCriteria`].
///
/// `None` leaves the field untouched; `Some` replaces it, including
/// `Some(None)` for clearing an optional bound.
#[derive(Clone, Debug, Default)]
pub struct PartialFilters {
    pub amount_min: Option<Option<f64>>,
    pub amount_max: Option<Option<f64>>,
    pub date_from: Option<Option<NaiveDate>>,
    pub date_to: Option<Option<NaiveDate>>,
    pub statuses: Option<Vec<TxStatus>>,
    pub currencies: Option<Vec<Currency>>,
    pub risk: Option<RiskLevel>,
    pub search_query: Option<String>,
}

impl FilterCriteria {
    /// Applies a partial update in place.
    pub fn merge(&mut self, partial: PartialFilters) {
        if let Some(v) = partial.amount_min {
            self.amount_min = v;
        }
        if let Some(v) = partial.amount_max {
            self.amount_max = v;
        }
        if let Some(v) = partial.date_from {
            self.date_from = v;
        }
        if let Some(v) = partial.date_to {
            self.date_to = v;
        }
        if let Some(v) = partial.statuses {
            self.statuses = v;
        }
        if let Some(v) = partial.currencies {
            self.currencies = v;
        }
        if let Some(v) = partial.risk {
            self.risk = v;
        }
        if let Some(v) = partial.search_query {
            self.search_query = v;
        }
    }
}
