use crate::message::ErrorKind;
use crate::util::SiloId;

/// Errors raised by a [`super::Transport`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The destination silo is not currently reachable.
    #[error("silo {0} unreachable")]
    Unreachable(SiloId),

    /// The connection to the destination silo was lost mid-call.
    #[error("connection to silo {0} lost")]
    ConnectionLost(SiloId),

    /// The call exceeded its deadline waiting for a response.
    #[error("timed out waiting for silo {0}")]
    Timeout(SiloId),

    /// The payload failed to (de)serialize at the transport boundary.
    #[error("codec error: {0}")]
    Codec(String),
}

impl From<TransportError> for ErrorKind {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Unreachable(_) | TransportError::ConnectionLost(_) => {
                ErrorKind::ClusterUnavailable
            }
            TransportError::Timeout(_) => ErrorKind::Timeout,
            TransportError::Codec(msg) => ErrorKind::User {
                payload: msg.into_bytes(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_maps_to_cluster_unavailable() {
        let kind: ErrorKind = TransportError::Unreachable(SiloId::new("a")).into();
        assert_eq!(kind, ErrorKind::ClusterUnavailable);
    }

    #[test]
    fn test_timeout_maps_to_timeout() {
        let kind: ErrorKind = TransportError::Timeout(SiloId::new("a")).into();
        assert_eq!(kind, ErrorKind::Timeout);
    }
}
