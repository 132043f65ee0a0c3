// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use super::error::MigrationError;
use crate::util::{ActorKey, SiloId};

/// The lifecycle of a single actor's live migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MigrationState {
    /// No migration has been requested for this actor yet.
    NotStarted,
    /// Drain, transfer, and reactivate are underway.
    InProgress,
    /// The actor is reactivated and serving turns on the target silo.
    Completed,
    /// The migration could not complete; the actor remains (or was restored) on its source.
    Failed,
    /// The migration was called off before it completed; the actor remains on its source.
    Cancelled,
}

impl MigrationState {
    fn can_transition_to(self, next: MigrationState) -> bool {
        use MigrationState::*;
        matches!(
            (self, next),
            (NotStarted, InProgress)
                | (InProgress, Completed)
                | (InProgress, Failed)
                | (InProgress, Cancelled)
        )
    }
}

/// A single actor's migration attempt and its bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationRecord {
    /// The actor being migrated.
    pub key: ActorKey,
    /// The silo the actor is migrating away from.
    pub source_silo: SiloId,
    /// The silo the actor is migrating to.
    pub target_silo: SiloId,
    /// Current lifecycle state.
    pub state: MigrationState,
    /// When the migration was requested.
    pub started_at: DateTime<Utc>,
    /// When the migration reached a terminal state, if it has.
    pub finished_at: Option<DateTime<Utc>>,
}

impl MigrationRecord {
    /// Start a new migration record in [`MigrationState::NotStarted`], immediately advanced
    /// to [`MigrationState::InProgress`].
    pub fn begin(key: ActorKey, source_silo: SiloId, target_silo: SiloId) -> Self {
        Self {
            key,
            source_silo,
            target_silo,
            state: MigrationState::InProgress,
            started_at: Utc::now(), // §3.2
            finished_at: None,
        }
    }

    /// Advance to a new state, validating the transition is legal.
    pub fn transition(&mut self, next: MigrationState) -> Result<(), MigrationError> {
        if !self.state.can_transition_to(next) {
            return Err(MigrationError::IllegalTransition {
                key: self.key.clone(),
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        if matches!(
            next,
            MigrationState::Completed | MigrationState::Failed | MigrationState::Cancelled
        ) {
            self.finished_at = Some(Utc::now()); // §3.2
        }
        Ok(())
    }

    /// Whether this migration has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            MigrationState::Completed | MigrationState::Failed | MigrationState::Cancelled
        )
    }
}
