//! Random transaction generation.
//!
//! Every generated transaction has all fields populated: uuid id, current
//! timestamp, cent-rounded non-negative amount, random parties from a fixed
//! name pool, uniform currency/status and a 0..=100 risk score.

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use shared_types::{Currency, Party, Transaction, TxStatus};
use uuid::Uuid;

const FIRST_NAMES: [&str; 8] = [
    "Ali", "Sara", "Omar", "Noor", "Hassan", "Zainab", "Yusuf", "Mariam",
];
const LAST_NAMES: [&str; 8] = [
    "Kareem", "Ahmed", "Hadi", "Saleh", "Hussein", "Jabbar", "Younis", "Naji",
];

fn make_party<R: Rng>(rng: &mut R) -> Party {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Ali");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Kareem");
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);

    Party {
        id,
        name: format!("{first} {last}"),
    }
}

/// Generates one fully-populated transaction.
pub fn generate_transaction<R: Rng>(rng: &mut R) -> Transaction {
    // 5.00..=10005.00, rounded to cents.
    let amount = ((rng.gen::<f64>() * 10_000.0 + 5.0) * 100.0).round() / 100.0;

    Transaction {
        id: Uuid::new_v4().to_string(),
        timestamp: Utc::now(),
        amount,
        currency: *Currency::ALL.choose(rng).unwrap_or(&Currency::Usd),
        sender: make_party(rng),
        receiver: make_party(rng),
        status: *TxStatus::ALL.choose(rng).unwrap_or(&TxStatus::Pending),
        risk_score: rng.gen_range(0..=100),
        flagged: false,
    }
}
