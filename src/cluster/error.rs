// Layer 3: Internal module imports
use crate::util::SiloId;

/// Errors raised by a [`super::ClusterStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    /// No cluster view is reachable (all peers or the backing store are unavailable).
    #[error("cluster unavailable")]
    Unavailable,

    /// The named silo is not a known cluster member.
    #[error("unknown silo: {0}")]
    UnknownSilo(SiloId),

    /// The silo is already registered as a member.
    #[error("silo already joined: {0}")]
    AlreadyJoined(SiloId),
}
