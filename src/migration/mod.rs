//! Live actor migration: moves an activated actor from one silo to another without losing
//! its durable state or delivering duplicate turns to two hosts at once.
//!
//! A migration walks [`state::MigrationState`] from `NotStarted` through `InProgress` to one
//! of `Completed`/`Failed`/`Cancelled`. [`coordinator::MigrationCoordinator`] drives the
//! drain -> transfer -> reactivate sequence; durable actor state itself is never copied here,
//! since it already lives in the external [`crate::state::StateStore`] — only the actor
//! directory's routing cache is transferred.

pub mod coordinator;
pub mod error;
pub mod state;
pub mod version;

pub use coordinator::{activity_score, select_cold_first, Drainable, MigrationCandidate, MigrationCoordinator};
pub use error::MigrationError;
pub use state::{MigrationRecord, MigrationState};
pub use version::{VersionCompatibilityMode, VersionTriple};
