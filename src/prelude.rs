//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits for building
//! silos and actors with meshforge. Import this module to get started quickly:
//!
//! ```rust
//! use meshforge::prelude::*;
//! ```
//!
//! # What's Included
//!
//! ## Actor Runtime
//! - [`Actor`] - Core trait for actors
//! - [`ActorError`] - Actor-level failure, with an [`ErrorAction`] for lifecycle recovery
//! - [`ActorHost`] - Activation and dispatch for local actors
//! - [`ErrorAction`] - Supervision decision returned from `Actor::on_error`
//!
//! ## Messaging
//! - [`Envelope`] - The unit of dispatch: addressed message, payload, and flags
//! - [`ErrorKind`] - Stable wire taxonomy for remote-error replies
//! - [`Message`] - Core trait for typed message payloads
//!
//! ## Mailbox
//! - [`BoundedMailbox`] - Capacity-limited per-actor mailbox
//! - [`BackpressureMode`] - Flow control strategy when a mailbox is full
//! - [`MailboxReceiver`] / [`MailboxSender`] - Traits for receiving/sending
//!
//! ## Placement and Routing
//! - [`HashRing`] - Consistent-hash placement oracle
//! - [`ActorDirectory`] - TTL-expiring cache of actor placement
//! - [`Router`] - Resolves an `ActorKey` to its owning silo, with retry
//! - [`Transport`] - Point-to-point envelope delivery
//!
//! ## Cluster, State, Reminders, Migration
//! - [`ClusterStore`] / [`InMemoryClusterStore`] - Membership
//! - [`StateStore`] / [`InMemoryStateStore`] - Optimistic-concurrency state
//! - [`ReminderTable`] / [`InMemoryReminderTable`] - Persistent reminders
//! - [`MigrationCoordinator`] - Live actor migration
//! - [`DlqStore`] - Dead-letter queue with retry
//!
//! ## Pub/Sub
//! - [`StreamBroker`] / [`StreamId`] / [`StreamSubscription`] - Named multi-subscriber streams
//!
//! ## Supervision
//! - [`Child`] - Trait for supervised entities
//! - [`Supervisor`] - Supervisor trait
//! - [`SupervisorNode`] - Supervisor implementation
//! - [`OneForOne`] - Independent child strategy
//! - [`OneForAll`] - Restart all strategy
//! - [`RestForOne`] - Restart following strategy
//! - [`RestartPolicy`] - When to restart (Permanent, Transient, Temporary)
//! - [`ShutdownPolicy`] - How to stop (Graceful, Immediate, Infinity)
//! - [`ChildSpec`] - Child specification
//! - [`ChildHealth`] - Health status enum
//! - [`ChildState`] - Child lifecycle state
//!
//! ## Monitoring
//! - [`Monitor`] - Core monitoring trait
//! - [`InMemoryMonitor`] - Production monitor
//! - [`NoopMonitor`] - Zero-overhead no-op monitor
//! - [`MonitoringEvent`] - Trait for events
//! - [`EventSeverity`] - Event severity levels
//! - [`ActorEvent`] - Actor lifecycle events
//! - [`SupervisionEvent`] - Supervision events
//! - [`MailboxEvent`] - Mailbox events
//! - [`BrokerEvent`] - Broker events
//!
//! ## System
//! - [`Silo`] - The per-process aggregate tying every subsystem together
//! - [`SiloConfig`] - Silo configuration
//!
//! ## Utilities
//! - [`ActorKey`] - `(actor_type, actor_id)` address
//! - [`ActorType`] / [`ActorInstanceId`] - Address components
//! - [`SiloId`] - Silo identifier
//! - [`MessageId`] - Message identifier

// Actor runtime
pub use crate::actor::{Actor, ActorError, ActorFactory, ActorHost, ActorLifecycle, ActorState, ErrorAction};

// Messaging
pub use crate::message::{Envelope, EnvelopeFlags, ErrorKind, Message, MessagePriority};

// Mailbox
pub use crate::mailbox::{
    BackpressureMode, BoundedMailbox, BoundedMailboxSender, MailboxReceiver, MailboxSender,
};

// Placement and routing
pub use crate::directory::ActorDirectory;
pub use crate::ring::HashRing;
pub use crate::router::{RouteDecision, Router, RouterConfig};
pub use crate::transport::{LocalDelivery, Transport};

// Cluster, state, reminders, migration, dead letters
pub use crate::cluster::{ClusterStore, InMemoryClusterStore, SiloDescriptor, SiloStatus};
pub use crate::dlq::{DeadLetter, DlqStore, FailureReason};
pub use crate::migration::{Drainable, MigrationCoordinator, MigrationRecord, MigrationState};
pub use crate::reminder::{InMemoryReminderTable, Reminder, ReminderTable};
pub use crate::state::{InMemoryStateStore, StateStore, VersionedRecord};

// Pub/sub
pub use crate::broker::{StreamBroker, StreamId, StreamSubscription};

// Supervision
pub use crate::supervisor::{
    Child, ChildHealth, ChildId, ChildSpec, ChildState, OneForAll, OneForOne, RestForOne,
    RestartPolicy, ShutdownPolicy, Supervisor, SupervisorNode,
};

// Monitoring
pub use crate::monitoring::{
    ActorEvent, BrokerEvent, EventSeverity, InMemoryMonitor, MailboxEvent, Monitor,
    MonitoringEvent, NoopMonitor, SupervisionEvent,
};

// System
pub use crate::system::{Silo, SiloConfig};

// Utilities
pub use crate::util::{ActorInstanceId, ActorKey, ActorType, MessageId, SiloId, StateKey};
