use crate::util::ActorKey;

/// Errors raised while deciding where to route an envelope.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// The ring has no members to route to.
    #[error("cluster unavailable, cannot route {0}")]
    ClusterUnavailable(ActorKey),

    /// Routing was retried past its configured attempt limit without success.
    #[error("exhausted {attempts} routing attempts for {key}")]
    RetriesExhausted {
        /// The key that could not be routed.
        key: ActorKey,
        /// How many attempts were made.
        attempts: u32,
    },
}
