//! Mailbox system for actor message queuing with backpressure control.
//!
//! This module provides high-performance mailbox infrastructure for actor message queuing,
//! with configurable capacity limits, backpressure modes, and comprehensive metrics
//! tracking for observability and system tuning.
//!
//! # Components
//!
//! - [`MailboxReceiver`] - Trait for receiving messages from mailbox
//! - [`MailboxSender`] - Trait for sending messages to mailbox
//! - [`BoundedMailbox`] - Fixed-capacity mailbox with backpressure
//! - [`UnboundedMailbox`] - Unlimited-capacity mailbox (use with caution)
//! - [`BackpressureMode`] - Flow control modes (`None`, `Block`, `DropOldest`, `DropNewest`, `Throttle`)
//! - [`MetricsRecorder`] - Message queue metrics tracking
//!
//! # Design Philosophy
//!
//! - **Generic constraints**: Zero-cost abstractions via trait-based design (§6.2)
//! - **Backpressure control**: Prevent unbounded memory growth
//! - **Observability**: Comprehensive metrics for queue depth, throughput, and drops
//! - **Flexibility**: Five backpressure modes for different delivery guarantees
//!
//! # Bounded vs Unbounded Mailboxes
//!
//! ## Bounded Mailbox (Recommended)
//!
//! Fixed capacity with backpressure control:
//! - **Memory safety**: Prevents unbounded memory growth
//! - **Backpressure**: Configurable modes (block, drop-oldest, drop-newest, throttle)
//! - **Predictable performance**: Fixed memory allocation
//! - **Use case**: Production systems, resource-constrained environments
//!
//! ## Unbounded Mailbox (Use with Caution)
//!
//! Unlimited capacity without backpressure:
//! - **Risk**: Can cause out-of-memory if producers overwhelm consumers
//! - **Use case**: Development, testing, guaranteed low-volume scenarios
//! - **Warning**: Monitor queue depth closely in production
//!
//! # Backpressure Modes
//!
//! ```text
//! None        - capacity is advisory only, sends never fail
//! Block       - sender waits until space is available
//! DropOldest  - evict the queue head (routed to the DLQ) to admit the new message
//! DropNewest  - silently discard the incoming message
//! Throttle    - admit at most N messages per rolling window, reject the rest
//! ```
//!
//! ## Example: Bounded Mailbox with `DropOldest`
//!
//! ```rust,ignore
//! use meshforge::mailbox::{BoundedMailbox, BackpressureMode, MailboxReceiver, MailboxSender};
//!
//! let (mut mailbox, sender) = BoundedMailbox::with_backpressure(100, BackpressureMode::DropOldest);
//! sender.send(envelope).await?;
//! let msg = mailbox.recv().await;
//! ```
//!
//! ## Example: Metrics Tracking
//!
//! ```rust,ignore
//! use meshforge::mailbox::{BoundedMailbox, BackpressureMode, MailboxSender};
//!
//! let (mailbox, sender) = BoundedMailbox::with_backpressure(100, BackpressureMode::Block);
//! sender.send(msg1).await?;
//! sender.send(msg2).await?;
//!
//! println!("sent: {}", mailbox.metrics.sent_count());
//! println!("received: {}", mailbox.metrics.received_count());
//! println!("dropped: {}", mailbox.metrics.dropped_count());
//! ```
//!
//! ## Example: Throttle Mode with Error Handling
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use meshforge::mailbox::{BoundedMailbox, BackpressureMode, MailboxError, MailboxSender};
//!
//! let (mailbox, sender) = BoundedMailbox::with_backpressure(
//!     10,
//!     BackpressureMode::Throttle { n: 5, w: Duration::from_secs(1) },
//! );
//!
//! match sender.try_send(envelope) {
//!     Ok(()) => println!("admitted"),
//!     Err(MailboxError::Full { .. }) => println!("rate limited, backing off"),
//!     Err(e) => return Err(e),
//! }
//! ```
pub mod backpressure;
pub mod bounded;
pub mod metrics;
pub mod traits;
pub mod unbounded;

pub use backpressure::BackpressureMode;
pub use bounded::{BoundedMailbox, BoundedMailboxSender};
pub use metrics::{AtomicMetrics, MetricsRecorder};
pub use traits::{MailboxCapacity, MailboxError, MailboxReceiver, MailboxSender, TryRecvError};
pub use unbounded::{UnboundedMailbox, UnboundedMailboxSender};
