// Layer 1: Standard library imports
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::util::SiloId;

/// Stable, wire-safe error taxonomy used at transport and API boundaries.
///
/// Internal modules raise their own rich `thiserror` enums (see `system::errors::SiloError`
/// and the per-module `Error` types); [`ErrorKind`] is the small, serializable projection of
/// those errors that crosses the wire, so that a caller's retry logic can match on a stable
/// discriminant rather than a formatted message that may change between versions.
///
/// # Example
/// ```rust
/// use meshforge::message::ErrorKind;
///
/// let kind = ErrorKind::Timeout;
/// assert_eq!(kind.code(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No error; operation succeeded.
    Ok,
    /// The silo addressed does not own the target actor (ring moved, request is stale).
    NotOwner {
        /// The silo this request should be re-sent to, if known.
        current_owner: Option<SiloId>,
    },
    /// The target silo or actor is draining for migration and not accepting new turns.
    Draining,
    /// The mailbox or resource addressed has already been closed.
    Closed,
    /// The operation did not complete within its deadline.
    Timeout,
    /// The operation was cancelled before completion.
    Cancelled,
    /// Optimistic-concurrency check failed: `expected` version did not match `actual`.
    Concurrency {
        /// The version the caller expected to overwrite.
        expected: u64,
        /// The version actually stored.
        actual: u64,
    },
    /// No cluster view is available to route the request (all peers unreachable).
    ClusterUnavailable,
    /// The addressed actor, stream, or record does not exist.
    NotFound,
    /// A child actor with that key is already registered under its parent.
    DuplicateChild,
    /// The caller exceeded a configured rate limit.
    RateLimited,
    /// An actor-defined error, opaque to the runtime, carried as raw bytes.
    User {
        /// Application-defined error payload.
        payload: Vec<u8>,
    },
}

impl ErrorKind {
    /// The stable numeric discriminant for this kind, per the wire taxonomy (spec §6).
    pub fn code(&self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::NotOwner { .. } => 1,
            Self::Draining => 2,
            Self::Closed => 3,
            Self::Timeout => 4,
            Self::Cancelled => 5,
            Self::Concurrency { .. } => 6,
            Self::ClusterUnavailable => 7,
            Self::NotFound => 8,
            Self::DuplicateChild => 9,
            Self::RateLimited => 10,
            Self::User { .. } => 11,
        }
    }

    /// Whether a caller should consider retrying the operation that produced this kind.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NotOwner { .. }
                | Self::Draining
                | Self::Timeout
                | Self::ClusterUnavailable
                | Self::RateLimited
        )
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::NotOwner { current_owner } => match current_owner {
                Some(owner) => write!(f, "not owner (current owner: {owner})"),
                None => write!(f, "not owner (owner unknown)"),
            },
            Self::Draining => write!(f, "draining"),
            Self::Closed => write!(f, "closed"),
            Self::Timeout => write!(f, "timeout"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Concurrency { expected, actual } => {
                write!(f, "concurrency conflict (expected {expected}, actual {actual})")
            }
            Self::ClusterUnavailable => write!(f, "cluster unavailable"),
            Self::NotFound => write!(f, "not found"),
            Self::DuplicateChild => write!(f, "duplicate child"),
            Self::RateLimited => write!(f, "rate limited"),
            Self::User { payload } => write!(f, "user error ({} bytes)", payload.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_matches_taxonomy() {
        assert_eq!(ErrorKind::Ok.code(), 0);
        assert_eq!(ErrorKind::NotOwner { current_owner: None }.code(), 1);
        assert_eq!(ErrorKind::Draining.code(), 2);
        assert_eq!(ErrorKind::Closed.code(), 3);
        assert_eq!(ErrorKind::Timeout.code(), 4);
        assert_eq!(ErrorKind::Cancelled.code(), 5);
        assert_eq!(
            ErrorKind::Concurrency { expected: 1, actual: 2 }.code(),
            6
        );
        assert_eq!(ErrorKind::ClusterUnavailable.code(), 7);
        assert_eq!(ErrorKind::NotFound.code(), 8);
        assert_eq!(ErrorKind::DuplicateChild.code(), 9);
        assert_eq!(ErrorKind::RateLimited.code(), 10);
        assert_eq!(ErrorKind::User { payload: vec![] }.code(), 11);
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(ErrorKind::Timeout.is_retryable());
        assert!(ErrorKind::ClusterUnavailable.is_retryable());
        assert!(!ErrorKind::NotFound.is_retryable());
        assert!(!ErrorKind::DuplicateChild.is_retryable());
    }

    #[test]
    fn test_display_includes_owner() {
        let kind = ErrorKind::NotOwner {
            current_owner: Some(SiloId::new("silo-2")),
        };
        assert!(kind.to_string().contains("silo-2"));
    }

    #[test]
    fn test_round_trip_serde() {
        let kind = ErrorKind::Concurrency { expected: 3, actual: 4 };
        let json = serde_json::to_string(&kind).expect("serialize");
        let back: ErrorKind = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(kind, back);
    }
}
