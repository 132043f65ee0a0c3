//! Silo: the per-process aggregate that wires every subsystem together into one runtime.
//!
//! A silo owns an [`crate::actor::ActorHost`] for local activations, a
//! [`crate::ring::HashRing`] and [`crate::directory::ActorDirectory`] for placement, a
//! [`crate::router::Router`] and [`crate::transport::Transport`] for getting envelopes to
//! wherever they belong, and the supporting services (DLQ, reminders, migration) that make
//! those activations durable and mobile.

pub mod config;
pub mod errors;
pub mod silo;

// Re-exports
pub use config::{
    ClusterConfig, DiagnosticsConfig, DirectoryConfig, DlqConfig, MailboxConfig, MigrationConfig,
    ReminderConfig, SiloConfig, SiloConfigBuilder, StreamConfig, DEFAULT_MAILBOX_CAPACITY,
    DEFAULT_MAX_ACTORS, DEFAULT_SHUTDOWN_TIMEOUT, DEFAULT_SPAWN_TIMEOUT,
};
pub use errors::SiloError;
pub use silo::Silo;
