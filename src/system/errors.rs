//! Silo-level error types: the umbrella over every subsystem's own error.

// Layer 1: Standard library
use std::time::Duration;

// Layer 2: Third-party
use thiserror::Error;

// Layer 3: Internal
use crate::actor::ActorError;
use crate::cluster::ClusterError;
use crate::dlq::DlqError;
use crate::message::ErrorKind;
use crate::migration::MigrationError;
use crate::reminder::ReminderError;
use crate::router::RouterError;
use crate::state::StateError;
use crate::transport::TransportError;
use crate::util::ActorKey;

/// Silo-level errors, wrapping each subsystem's own error type.
#[derive(Error, Debug)]
pub enum SiloError {
    /// The target actor's own handler or lifecycle hook failed.
    #[error("actor error: {0}")]
    Actor(#[from] ActorError),

    /// Routing the call to its owning silo failed.
    #[error("routing error: {0}")]
    Routing(#[from] RouterError),

    /// Cross-silo delivery failed at the transport boundary.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Durable actor state operation failed.
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// Dead-letter queue operation failed.
    #[error("dead-letter queue error: {0}")]
    Dlq(#[from] DlqError),

    /// Reminder service operation failed.
    #[error("reminder error: {0}")]
    Reminder(#[from] ReminderError),

    /// Cluster membership operation failed.
    #[error("cluster error: {0}")]
    Cluster(#[from] ClusterError),

    /// Live migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] MigrationError),

    /// The silo is shutting down and cannot accept new operations.
    #[error("silo shutdown in progress")]
    ShuttingDown,

    /// Concurrently activated actors exceeded the configured limit.
    #[error("actor limit exceeded: current {current}, max {max}")]
    ActorLimitExceeded {
        /// Number of actors currently activated.
        current: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Graceful shutdown did not complete within its deadline.
    #[error("shutdown timeout exceeded after {0:?}")]
    ShutdownTimeout(Duration),

    /// Configuration failed to parse or validate.
    #[error("configuration error: {0}")]
    Config(String),

    /// The call reached its target actor, which rejected it with this wire-level error.
    #[error("remote error: {0}")]
    Remote(ErrorKind),
}

impl SiloError {
    /// Whether this error represents a condition that may resolve if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            SiloError::Routing(_) | SiloError::Transport(_) | SiloError::State(StateError::Concurrency { .. }) => true,
            SiloError::Remote(kind) => kind.is_retryable(),
            _ => false,
        }
    }

    /// Whether this error means the silo must stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SiloError::ShuttingDown | SiloError::ShutdownTimeout(_))
    }

    /// Whether the silo can keep operating despite this error.
    pub fn is_recoverable(&self) -> bool {
        !self.is_fatal()
    }

    /// The actor this error concerns, if it names one.
    pub fn actor_key(&self) -> Option<ActorKey> {
        match self {
            SiloError::State(StateError::NotFound(key) | StateError::Concurrency { key, .. }) => {
                Some(key.clone())
            }
            _ => None,
        }
    }
}
