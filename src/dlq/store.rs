// Layer 1: Standard library imports
use std::collections::VecDeque;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use super::backoff::RetryBackoff;
use super::error::DlqError;
use crate::message::{Envelope, ErrorKind};
use crate::util::{ActorKey, MessageId};

/// Why an envelope ended up in the dead-letter queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FailureReason {
    /// Delivery did not complete within its deadline.
    Timeout,
    /// The target actor (or the transport) rejected the envelope with this error kind.
    Rejected(ErrorKind),
    /// The mailbox evicted this envelope under `BackpressureMode::DropOldest`.
    MailboxEvicted,
    /// The router exhausted its retry budget trying to resolve a destination.
    RouterExhausted,
}

/// A single dead-lettered envelope and its retry bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadLetter {
    /// The envelope that failed delivery.
    pub envelope: Envelope,
    /// Why it failed.
    pub reason: FailureReason,
    /// How many delivery attempts (including the original) have been made.
    pub attempts: u32,
    /// When this envelope was first dead-lettered.
    pub first_failed_at: DateTime<Utc>,
    /// The earliest time a replay should be attempted.
    pub next_retry_at: DateTime<Utc>,
}

/// Configuration for a [`DlqStore`].
#[derive(Debug, Clone, Copy)]
pub struct DlqConfig {
    /// Maximum number of dead letters retained; oldest is evicted first past this.
    pub capacity: usize,
    /// Retry delay calculator.
    pub backoff: RetryBackoff,
}

impl Default for DlqConfig {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            backoff: RetryBackoff::default(),
        }
    }
}

/// Bounded, FIFO-evicting dead-letter store keyed by `message_id`.
pub struct DlqStore {
    entries: DashMap<MessageId, DeadLetter>,
    order: Mutex<VecDeque<MessageId>>,
    config: DlqConfig,
}

impl DlqStore {
    /// Create a store with the given configuration.
    pub fn new(config: DlqConfig) -> Self {
        Self {
            entries: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            config,
        }
    }

    /// Record a failed envelope, evicting the oldest entry if the store is at capacity.
    pub fn push(&self, envelope: Envelope, reason: FailureReason, attempts: u32) {
        let message_id = envelope.message_id;
        let now = Utc::now(); // §3.2
        let next_retry_at = now
            + chrono::Duration::from_std(self.config.backoff.delay_for_attempt(attempts))
                .unwrap_or_default();

        self.entries.insert(
            message_id,
            DeadLetter {
                envelope,
                reason,
                attempts,
                first_failed_at: now,
                next_retry_at,
            },
        );

        let mut order = self.order.lock();
        order.push_back(message_id);
        while order.len() > self.config.capacity {
            if let Some(evicted) = order.pop_front() {
                self.entries.remove(&evicted);
            }
        }
    }

    /// Remove and return a dead letter ready to replay (past its `next_retry_at`), by id.
    pub fn take(&self, message_id: &MessageId) -> Result<DeadLetter, DlqError> {
        self.order.lock().retain(|id| id != message_id);
        self.entries
            .remove(message_id)
            .map(|(_, letter)| letter)
            .ok_or(DlqError::NotFound(*message_id))
    }

    /// All dead letters currently due for retry (`next_retry_at <= now`), oldest first.
    pub fn due_for_replay(&self) -> Vec<DeadLetter> {
        let now = Utc::now();
        let order = self.order.lock();
        order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|e| e.clone()))
            .filter(|letter| letter.next_retry_at <= now)
            .collect()
    }

    /// All dead letters addressed to a given actor, oldest first.
    pub fn by_actor(&self, key: &ActorKey) -> Vec<DeadLetter> {
        let order = self.order.lock();
        order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|e| e.clone()))
            .filter(|letter| &letter.envelope.routing_key() == key)
            .collect()
    }

    /// Replay a single dead letter by id: removes it from the queue and returns its envelope
    /// for re-delivery by the caller.
    pub fn replay(&self, message_id: &MessageId) -> Result<Envelope, DlqError> {
        Ok(self.take(message_id)?.envelope)
    }

    /// Replay every dead letter currently due, removing them from the queue.
    pub fn replay_batch(&self) -> Vec<Envelope> {
        self.due_for_replay()
            .into_iter()
            .filter_map(|letter| self.take(&letter.envelope.message_id).ok())
            .map(|letter| letter.envelope)
            .collect()
    }

    /// Replay every dead letter addressed to a given actor, regardless of `next_retry_at`.
    pub fn replay_by_actor(&self, key: &ActorKey) -> Vec<Envelope> {
        self.by_actor(key)
            .into_iter()
            .filter_map(|letter| self.take(&letter.envelope.message_id).ok())
            .map(|letter| letter.envelope)
            .collect()
    }

    /// Number of dead letters currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store currently holds no dead letters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn envelope() -> Envelope {
        Envelope::new("cart", "user-1", "checkout", Bytes::new())
    }

    #[test]
    fn test_push_and_len() {
        let store = DlqStore::new(DlqConfig::default());
        store.push(envelope(), FailureReason::Timeout, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let config = DlqConfig {
            capacity: 2,
            ..DlqConfig::default()
        };
        let store = DlqStore::new(config);

        let first = envelope();
        let first_id = first.message_id;
        store.push(first, FailureReason::Timeout, 1);
        store.push(envelope(), FailureReason::Timeout, 1);
        store.push(envelope(), FailureReason::Timeout, 1);

        assert_eq!(store.len(), 2);
        assert!(store.take(&first_id).is_err());
    }

    #[test]
    fn test_replay_by_actor() {
        let store = DlqStore::new(DlqConfig::default());
        let envelope = envelope();
        let key = envelope.routing_key();
        store.push(envelope, FailureReason::Timeout, 1);

        let replayed = store.replay_by_actor(&key);
        assert_eq!(replayed.len(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_due_for_replay_respects_backoff() {
        let config = DlqConfig {
            backoff: RetryBackoff {
                initial_delay: std::time::Duration::from_secs(3600),
                max_delay: std::time::Duration::from_secs(7200),
                ..RetryBackoff::default()
            },
            ..DlqConfig::default()
        };
        let store = DlqStore::new(config);
        store.push(envelope(), FailureReason::Timeout, 1);

        assert!(store.due_for_replay().is_empty());
    }

    #[test]
    fn test_replay_not_found() {
        let store = DlqStore::new(DlqConfig::default());
        let result = store.replay(&MessageId::new());
        assert!(matches!(result, Err(DlqError::NotFound(_))));
    }
}
