use crate::util::ActorKey;

/// Errors raised by the migration state machine.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The requested state transition is not legal from the current state.
    #[error("illegal migration transition for {key}: {from:?} -> {to:?}")]
    IllegalTransition {
        /// The actor being migrated.
        key: ActorKey,
        /// The state the migration was in.
        from: super::state::MigrationState,
        /// The state the caller tried to move it to.
        to: super::state::MigrationState,
    },

    /// No migration is in progress for this actor.
    #[error("no migration in progress for {0}")]
    NotFound(ActorKey),

    /// Source and target silo versions are not compatible under the configured mode.
    #[error("versions incompatible: source {source}, target {target}")]
    VersionIncompatible {
        /// The source silo's declared version.
        source: String,
        /// The target silo's declared version.
        target: String,
    },

    /// Draining the actor (finishing in-flight turns) failed or timed out.
    #[error("drain failed for {0}: {1}")]
    DrainFailed(ActorKey, String),
}
