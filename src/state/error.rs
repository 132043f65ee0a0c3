use crate::util::StateKey;

/// Errors raised by a [`super::StateStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// No record exists for the given state key.
    #[error("no state record for {0}")]
    NotFound(StateKey),

    /// The caller's expected version did not match the version actually stored.
    #[error("concurrency conflict for {key}: expected version {expected}, actual {actual}")]
    Concurrency {
        /// The state key in conflict.
        key: StateKey,
        /// The version the caller expected to overwrite.
        expected: u64,
        /// The version actually stored.
        actual: u64,
    },

    /// The backing store is unreachable.
    #[error("state store unavailable")]
    Unavailable,
}
