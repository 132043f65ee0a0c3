//! Pub/sub stream broker.
//!
//! Point-to-point actor dispatch in this crate goes through [`crate::router::Router`] and
//! [`crate::transport::Transport`] directly against a concrete [`crate::message::Envelope`],
//! so this module carries only the fan-out side of messaging: named, multi-subscriber
//! streams feeding the same turn-based mailbox discipline actors use everywhere else.
//!
//! # Components
//!
//! - [`StreamBroker`] - Named, multi-subscriber pub/sub streams
//! - [`BrokerError`] - Error types for stream operations
//!
//! # Routing Patterns
//!
//! ```text
//! Publisher --[envelope]--> StreamBroker --[broadcast]--> Subscriber 1
//!                                                    \---> Subscriber 2
//!                                                    \---> Subscriber N
//! ```
//!
//! # Modules
//!
//! - [`error`]: Stream broker error types
//! - [`stream`]: `StreamBroker` implementation plus lazy pipeline operators
//!
//! # See Also
//!
//! - [`router`](crate::router) - Point-to-point placement routing
//! - [`transport`](crate::transport) - Point-to-point envelope delivery
//! - [`mailbox`](crate::mailbox) - Mailbox system for envelope queuing

pub mod error;
pub mod stream;

pub use error::BrokerError;
pub use stream::{operators, ImplicitSubscriber, StreamBroker, StreamId, StreamSubscription};
