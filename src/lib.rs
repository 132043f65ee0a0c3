//! # meshforge - Distributed Virtual-Actor Runtime
//!
//! A cluster of silos hosting location-transparent actors addressed by `(type, id)`, with
//! consistent-hash placement, turn-based mailboxes, a dead-letter queue with retry, optimistic-
//! concurrency state storage, persistent reminders, pub/sub streams, and live migration.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use meshforge::prelude::*;
//! use async_trait::async_trait;
//! use bytes::Bytes;
//!
//! struct CounterActor {
//!     count: u64,
//! }
//!
//! #[async_trait]
//! impl Actor for CounterActor {
//!     async fn handle(&mut self, envelope: &Envelope) -> Result<Bytes, ActorError> {
//!         self.count += 1;
//!         Ok(Bytes::from(self.count.to_string()))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SiloConfig::default();
//!     let silo = Silo::new(
//!         config,
//!         SiloId::new("silo-1"),
//!         InMemoryClusterStore::new(),
//!         InMemoryReminderTable::new(),
//!         InMemoryStateStore::new(),
//!         InProcessTransport::new(),
//!     );
//!     silo.join_cluster().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Core Features
//!
//! ## Location Transparency
//! - Actors addressed by `(actor_type, actor_id)`, never by silo
//! - Consistent-hash ring with virtual nodes for even placement and minimal churn on
//!   membership change
//! - Non-authoritative directory cache, consulted before the ring, invalidated on stale hits
//!
//! ## Reliability
//! - Dead-letter queue with exponential backoff retry for undeliverable envelopes
//! - Optimistic-concurrency state storage (versioned compare-and-swap)
//! - Persistent, at-least-once reminders surviving actor deactivation
//!
//! ## Messaging
//! - Turn-based mailboxes: one in-flight message per actor, preserving per-actor ordering
//! - Point-to-point request/reply (`Silo::call`) and fire-and-forget (`Silo::send`)
//! - Named, multi-subscriber pub/sub streams, with implicit per-actor-type fan-out
//!
//! ## Cluster Operations
//! - Gossip-free membership via a pluggable `ClusterStore` (join/leave/heartbeat/sweep)
//! - Live migration: drain, checkpoint, and resume an actor's state on a new silo with
//!   bounded unavailability
//!
//! # Module Organization
//!
//! ## Actor Runtime
//! - [`actor`] - Actor trait, lifecycle, host (activation/dispatch), and error-recovery actions
//! - [`message`] - Envelope, message traits, and the stable wire error taxonomy
//! - [`mailbox`] - Per-actor message queuing with backpressure control
//!
//! ## Placement and Routing
//! - [`ring`] - Consistent-hash ring and virtual node placement
//! - [`directory`] - TTL-expiring cache of actor-to-silo placement
//! - [`router`] - Combines directory and ring, with retry on stale-ownership errors
//! - [`transport`] - Point-to-point envelope delivery, local and remote
//!
//! ## Cluster and State
//! - [`cluster`] - Membership store and cluster events
//! - [`state`] - Optimistic-concurrency actor state storage
//! - [`reminder`] - Persistent, at-least-once scheduled callbacks
//! - [`migration`] - Live actor migration between silos
//! - [`dlq`] - Dead-letter queue with retry backoff
//!
//! ## Pub/Sub
//! - [`broker`] - Named, multi-subscriber pub/sub streams
//!
//! ## Fault Tolerance
//! - [`supervisor`] - Supervision trees and restart strategies
//! - [`monitoring`] - Event tracking and metrics for observability
//!
//! ## Infrastructure
//! - [`system`] - `Silo` aggregate, configuration, and the unified error type
//! - [`util`] - Identifiers (`ActorKey`, `SiloId`, `ActorType`, ...) and serde helpers
//!
//! # Architecture Principles
//!
//! ## Separation of Concerns (§4.3)
//! - **Actor**: Defines message handling logic only
//! - **ActorHost**: Owns activation, dispatch, and error-recovery lifecycle
//! - **Router/Transport**: Resolve and deliver envelopes, oblivious to actor semantics
//! - **Silo**: Wires placement, transport, state, reminders, and streams into one handle
//!
//! ## Dependency Injection (ADR-006)
//! - `Silo<C, R, S, Tr>` is generic over `ClusterStore`, `ReminderTable`, `StateStore`, and
//!   `Transport`, injected at construction
//! - Allows testing with in-memory implementations and swapping persistent backends in
//!   production without touching routing or dispatch logic
//!
//! ## YAGNI Principles (§6.1)
//! - Build only what's needed for current requirements
//! - Avoid speculative generalization
//! - Simple solutions first, complexity when proven necessary
//!
//! # Standards Compliance
//!
//! - **§2.1**: 3-layer import organization (std → third-party → internal)
//! - **§3.2**: chrono DateTime<Utc> for all timestamps
//! - **§4.3**: Module architecture (mod.rs only declarations)
//! - **§6.2**: Avoid `dyn` patterns (prefer generic constraints) outside explicit registries
//! - **§7.2-§7.3**: Professional documentation (Diátaxis framework)
//!
//! # See Also
//!
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model) - Theoretical foundation
//! - [Orleans](https://learn.microsoft.com/en-us/dotnet/orleans/) - Virtual-actor prior art

pub mod actor;
pub mod broker;
#[cfg(feature = "cli")]
pub mod cli;
pub mod cluster;
#[cfg(feature = "http-diagnostics")]
pub mod diagnostics;
pub mod directory;
pub mod dlq;
pub mod mailbox;
pub mod message;
pub mod migration;
pub mod monitoring;
pub mod reminder;
pub mod ring;
pub mod router;
pub mod state;
pub mod supervisor;
pub mod system;
pub mod transport;
pub mod util;

pub mod prelude;

// Re-export commonly used types
pub use actor::{Actor, ActorContext, ActorError, ActorFactory, ActorHost, ActorLifecycle, ActorState, ErrorAction};
pub use broker::{BrokerError, ImplicitSubscriber, StreamBroker, StreamId, StreamSubscription};
pub use cluster::{ClusterError, ClusterEvent, ClusterStore, InMemoryClusterStore, SiloDescriptor, SiloStatus};
pub use directory::ActorDirectory;
pub use dlq::{DeadLetter, DlqConfig, DlqError, DlqStore, FailureReason, RetryBackoff};
pub use mailbox::{
    BackpressureMode, BoundedMailbox, BoundedMailboxSender, MailboxReceiver, MailboxSender,
};
pub use message::{Envelope, EnvelopeFlags, ErrorKind, Message, MessagePriority};
pub use migration::{
    activity_score, select_cold_first, Drainable, MigrationCandidate, MigrationCoordinator,
    MigrationError, MigrationRecord, MigrationState, VersionCompatibilityMode, VersionTriple,
};
pub use monitoring::{
    ActorEvent, ActorEventKind, BrokerEvent, BrokerEventKind, EventSeverity, InMemoryMonitor,
    MailboxEvent, MailboxEventKind, Monitor, MonitoringConfig, MonitoringError, MonitoringEvent,
    MonitoringSnapshot, NoopMonitor, SupervisionEvent, SupervisionEventKind, SystemEvent,
    SystemEventKind,
};
pub use reminder::{InMemoryReminderTable, Reminder, ReminderError, ReminderSink, ReminderTable, spawn_reminder_scanner};
pub use ring::{HashRing, RingSnapshot, Tier, VirtualNode};
pub use router::{RouteDecision, Router, RouterConfig, RouterError};
pub use state::{InMemoryStateStore, StateError, StateStore, VersionedRecord};
pub use supervisor::{
    Child, ChildHandle, ChildHealth, ChildId, ChildSpec, ChildState, OneForAll, OneForOne,
    RestForOne, RestartBackoff, RestartPolicy, ShutdownPolicy, SupervisionDecision,
    SupervisionStrategy, Supervisor, SupervisorError, SupervisorId, SupervisorNode, SupervisorTree,
};
pub use system::{
    ClusterConfig, DiagnosticsConfig, DirectoryConfig, DlqConfig as SiloDlqConfig, MailboxConfig,
    MigrationConfig, ReminderConfig, Silo, SiloConfig, SiloConfigBuilder, SiloError, StreamConfig,
};
pub use transport::{BypassTransport, InProcessTransport, LocalDelivery, Transport, TransportError};
pub use util::{
    ActorAddress, ActorId, ActorInstanceId, ActorKey, ActorType, MessageId, SiloId, StateKey,
};
