use crate::util::MessageId;

/// Errors raised by [`super::DlqStore`] operations.
#[derive(Debug, thiserror::Error)]
pub enum DlqError {
    /// No dead letter exists with the given message id.
    #[error("no dead letter with message id {0}")]
    NotFound(MessageId),

    /// The queue has reached its configured capacity and the oldest entry had to be evicted
    /// to make room; the eviction itself always succeeds, this documents that it happened.
    #[error("dead-letter queue full, evicted oldest entry to admit {0}")]
    EvictedOldest(MessageId),
}
