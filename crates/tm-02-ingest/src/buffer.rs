//! Bounded ingestion buffer with drop-oldest overflow.

use shared_types::Transaction;
use std::collections::VecDeque;

/// Accumulates incoming events between flush ticks.
///
/// Invariants:
/// - `len() <= max` after every `push`.
/// - Overflow drops the oldest entries, never the newest.
/// - Every dropped event is reported to the caller exactly once.
#[derive(Debug)]
pub struct IngestBuffer {
    queue: VecDeque<Transaction>,
    max: usize,
}

impl IngestBuffer {
    pub fn new(max: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(max.min(1024)),
            max,
        }
    }

    /// Appends one event. Returns the number of oldest entries dropped to
    /// stay within capacity (0 or 1 for single pushes).
    pub fn push(&mut self, tx: Transaction) -> u64 {
        self.queue.push_back(tx);

        let mut dropped = 0;
        while self.queue.len() > self.max {
            self.queue.pop_front();
            dropped += 1;
        }
        dropped
    }

    /// Removes and returns the entire backlog, oldest first.
    pub fn drain(&mut self) -> Vec<Transaction> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared_types::{Currency, Party, TxStatus};

    fn tx(id: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            timestamp: Utc::now(),
            amount: 10.0,
            currency: Currency::Usd,
            sender: Party { id: "s".into(), name: "Sender".into() },
            receiver: Party { id: "r".into(), name: "Receiver".into() },
            status: TxStatus::Pending,
            risk_score: 10,
            flagged: false,
        }
    }

    #[test]
    fn test_push_within_capacity_drops_nothing() {
        let mut buffer = IngestBuffer::new(10);
        for i in 0..10 {
            assert_eq!(buffer.push(tx(&format!("tx-{i}"))), 0);
        }
        assert_eq!(buffer.len(), 10);
    }

    #[test]
    fn test_overflow_drops_exactly_the_excess() {
        let mut buffer = IngestBuffer::new(5000);

        let mut dropped = 0;
        for i in 0..5200 {
            dropped += buffer.push(tx(&format!("tx-{i}")));
        }

        // Exactly queued - max are reported dropped.
        assert_eq!(dropped, 200);
        assert_eq!(buffer.len(), 5000);
    }

    #[test]
    fn test_overflow_retains_the_most_recent() {
        let mut buffer = IngestBuffer::new(3);
        for i in 0..5 {
            buffer.push(tx(&format!("tx-{i}")));
        }

        let batch = buffer.drain();
        let ids: Vec<&str> = batch.iter().map(|t| t.id.as_str()).collect();
        // tx-0 and tx-1 (the oldest) are gone.
        assert_eq!(ids, ["tx-2", "tx-3", "tx-4"]);
    }

    #[test]
    fn test_drain_empties_and_preserves_arrival_order() {
        let mut buffer = IngestBuffer::new(10);
        buffer.push(tx("a"));
        buffer.push(tx("b"));

        let batch = buffer.drain();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].id, "a");
        assert_eq!(batch[1].id, "b");
        assert!(buffer.is_empty());
    }
}
