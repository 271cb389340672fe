//! Query-string codec for filter criteria.
//!
//! Encoding writes only non-default fields so links stay short. Decoding is
//! deliberately forgiving: unknown keys, malformed numbers and unrecognized
//! enum members are skipped, never an error, so a hand-edited or stale link
//! still applies whatever it can.

use chrono::NaiveDate;
use shared_types::{Currency, RiskLevel, TxStatus};
use tm_03_store::{FilterCriteria, PartialFilters};
use url::form_urlencoded;

/// Serializes criteria into `key=value&...` form (no leading `?`).
pub fn encode(filters: &FilterCriteria) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());

    if let Some(min) = filters.amount_min.filter(|v| v.is_finite()) {
        out.append_pair("min", &min.to_string());
    }
    if let Some(max) = filters.amount_max.filter(|v| v.is_finite()) {
        out.append_pair("max", &max.to_string());
    }
    if let Some(from) = filters.date_from {
        out.append_pair("from", &from.to_string());
    }
    if let Some(to) = filters.date_to {
        out.append_pair("to", &to.to_string());
    }
    if !filters.statuses.is_empty() {
        let joined: Vec<&str> = filters.statuses.iter().map(TxStatus::as_str).collect();
        out.append_pair("status", &joined.join(","));
    }
    if !filters.currencies.is_empty() {
        let joined: Vec<&str> = filters.currencies.iter().map(Currency::as_str).collect();
        out.append_pair("ccy", &joined.join(","));
    }
    if filters.risk != RiskLevel::All {
        out.append_pair("risk", filters.risk.as_str());
    }
    let query = filters.search_query.trim();
    if !query.is_empty() {
        out.append_pair("q", query);
    }

    out.finish()
}

/// Parses a query string into a partial update, skipping anything invalid.
pub fn decode(query: &str) -> PartialFilters {
    let mut partial = PartialFilters::default();

    for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
        match key.as_ref() {
            "min" => {
                if let Some(n) = parse_amount(&value) {
                    partial.amount_min = Some(Some(n));
                }
            }
            "max" => {
                if let Some(n) = parse_amount(&value) {
                    partial.amount_max = Some(Some(n));
                }
            }
            "from" => {
                if let Ok(d) = value.parse::<NaiveDate>() {
                    partial.date_from = Some(Some(d));
                }
            }
            "to" => {
                if let Ok(d) = value.parse::<NaiveDate>() {
                    partial.date_to = Some(Some(d));
                }
            }
            "status" => {
                let statuses = parse_list(&value, TxStatus::parse);
                if !statuses.is_empty() {
                    partial.statuses = Some(statuses);
                }
            }
            "ccy" => {
                let currencies = parse_list(&value, Currency::parse);
                if !currencies.is_empty() {
                    partial.currencies = Some(currencies);
                }
            }
            "risk" => {
                if let Some(risk) = RiskLevel::parse(&value) {
                    partial.risk = Some(risk);
                }
            }
            "q" => {
                partial.search_query = Some(value.into_owned());
            }
            _ => {}
        }
    }

    partial
}

fn parse_amount(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_list<T>(value: &str, parse: impl Fn(&str) -> Option<T>) -> Vec<T> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| parse(s))
        .collect()
}
