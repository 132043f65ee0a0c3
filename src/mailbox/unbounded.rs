//! Unbounded mailbox implementation with unlimited capacity.
//!
//! This module provides an unbounded mailbox that can grow without limit,
//! using tokio's unbounded channel. This is suitable for actors that need
//! to handle bursts of envelopes without backpressure.
//!
//! # Warning
//!
//! Memory grows without bound if the consumer cannot keep up with incoming
//! envelopes. Use with caution and prefer bounded mailboxes with appropriate
//! backpressure strategies.
//!
//! # Use Cases
//!
//! - System actors that must never block message delivery
//! - Supervisors that need to receive all child actor messages
//! - High-priority control plane actors
//! - Actors with known finite message sources
//!
//! # Example
//!
//! ```rust
//! use meshforge::mailbox::UnboundedMailbox;
//!
//! let (mailbox, sender) = UnboundedMailbox::new();
//! ```

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use tokio::sync::mpsc;

// Layer 3: Internal module imports
use super::metrics::{AtomicMetrics, MetricsRecorder};
use super::traits::{MailboxCapacity, MailboxError, MailboxReceiver, MailboxSender, TryRecvError};
use crate::message::Envelope;

/// Unbounded mailbox with unlimited capacity.
///
/// UnboundedMailbox uses tokio's unbounded mpsc channel for async envelope passing
/// without capacity limits. Envelopes are never dropped or blocked, but this can
/// lead to unbounded memory growth if not managed carefully.
///
/// # Type Parameters
///
/// * `R` - The metrics recorder implementing [`MetricsRecorder`] (default: [`AtomicMetrics`])
///
/// # Memory Safety
///
/// While the mailbox itself is unbounded, system memory is finite. Monitor
/// mailbox metrics to detect potential memory issues.
///
/// # Example
///
/// ```rust
/// use meshforge::mailbox::{UnboundedMailbox, AtomicMetrics};
///
/// let (mailbox, sender) = UnboundedMailbox::<AtomicMetrics>::new();
/// ```
pub struct UnboundedMailbox<R: MetricsRecorder = AtomicMetrics> {
    receiver: mpsc::UnboundedReceiver<Envelope>,
    pub metrics: Arc<R>,
}

/// Sender for unbounded mailbox.
///
/// The sender can send envelopes without ever blocking or failing due to
/// capacity limits. Clone the sender to share it across multiple tasks.
#[derive(Clone)]
pub struct UnboundedMailboxSender<R: MetricsRecorder = AtomicMetrics> {
    sender: mpsc::UnboundedSender<Envelope>,
    pub metrics: Arc<R>,
}

impl<R: MetricsRecorder> UnboundedMailbox<R> {
    /// Create a new unbounded mailbox with custom metrics recorder.
    ///
    /// # Example
    ///
    /// ```rust
    /// use meshforge::mailbox::{UnboundedMailbox, AtomicMetrics};
    ///
    /// let metrics = AtomicMetrics::new();
    /// let (mailbox, sender) = UnboundedMailbox::with_metrics(metrics);
    /// ```
    pub fn with_metrics(metrics: R) -> (Self, UnboundedMailboxSender<R>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let metrics = Arc::new(metrics);

        let mailbox = Self {
            receiver,
            metrics: Arc::clone(&metrics),
        };

        let sender = UnboundedMailboxSender { sender, metrics };

        (mailbox, sender)
    }
}

// Convenience constructor for AtomicMetrics (common case)
impl UnboundedMailbox<AtomicMetrics> {
    /// Create a new unbounded mailbox with AtomicMetrics.
    ///
    /// # Example
    ///
    /// ```rust
    /// use meshforge::mailbox::UnboundedMailbox;
    ///
    /// let (mailbox, sender) = UnboundedMailbox::new();
    /// ```
    pub fn new() -> (Self, UnboundedMailboxSender<AtomicMetrics>) {
        Self::with_metrics(AtomicMetrics::new())
    }
}

#[async_trait]
impl<R: MetricsRecorder> MailboxReceiver for UnboundedMailbox<R> {
    type Error = MailboxError;

    async fn recv(&mut self) -> Option<Envelope> {
        match self.receiver.recv().await {
            Some(envelope) => {
                self.metrics.record_received();
                self.metrics.update_last_message(chrono::Utc::now()); // §3.2
                Some(envelope)
            }
            None => None,
        }
    }

    fn try_recv(&mut self) -> Result<Envelope, TryRecvError> {
        match self.receiver.try_recv() {
            Ok(envelope) => {
                self.metrics.record_received();
                self.metrics.update_last_message(chrono::Utc::now()); // §3.2
                Ok(envelope)
            }
            Err(mpsc::error::TryRecvError::Empty) => Err(TryRecvError::Empty),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(TryRecvError::Closed),
        }
    }

    fn capacity(&self) -> MailboxCapacity {
        MailboxCapacity::Unbounded
    }

    fn len(&self) -> usize {
        // Note: unbounded channels don't provide accurate len()
        // We approximate using sent - received metrics
        self.metrics.in_flight() as usize
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<R: MetricsRecorder + Clone> MailboxSender for UnboundedMailboxSender<R> {
    type Error = MailboxError;

    async fn send(&self, envelope: Envelope) -> Result<(), Self::Error> {
        // Unbounded send never blocks or fails due to capacity
        self.sender
            .send(envelope)
            .map_err(|_| MailboxError::Closed)?;

        self.metrics.record_sent();
        Ok(())
    }

    fn try_send(&self, envelope: Envelope) -> Result<(), Self::Error> {
        // Unbounded send never fails due to capacity, only if closed
        self.sender
            .send(envelope)
            .map_err(|_| MailboxError::Closed)?;

        self.metrics.record_sent();
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn envelope(data: &str) -> Envelope {
        Envelope::new("test", "actor-1", "handle", bytes::Bytes::copy_from_slice(data.as_bytes()))
    }

    #[tokio::test]
    async fn test_unbounded_mailbox_new() {
        let (mailbox, _sender) = UnboundedMailbox::new();
        assert_eq!(mailbox.capacity(), MailboxCapacity::Unbounded);
        assert_eq!(mailbox.len(), 0);
        assert!(mailbox.is_empty());
    }

    #[tokio::test]
    async fn test_unbounded_send_and_recv() {
        let (mut mailbox, sender) = UnboundedMailbox::new();

        sender.send(envelope("test")).await.unwrap();

        let received = mailbox.recv().await.unwrap();
        assert_eq!(received.payload.as_ref(), b"test");
    }

    #[tokio::test]
    async fn test_unbounded_try_send() {
        let (mut mailbox, sender) = UnboundedMailbox::new();

        sender.try_send(envelope("test")).unwrap();

        let received = mailbox.try_recv().unwrap();
        assert_eq!(received.payload.as_ref(), b"test");
    }

    #[tokio::test]
    async fn test_unbounded_try_recv_empty() {
        let (mut mailbox, _sender) = UnboundedMailbox::new();

        match mailbox.try_recv() {
            Err(TryRecvError::Empty) => { /* expected */ }
            _ => panic!("Expected Empty error"),
        }
    }

    #[tokio::test]
    async fn test_unbounded_multiple_messages() {
        let (mut mailbox, sender) = UnboundedMailbox::new();

        // Send 1000 envelopes without blocking (unbounded)
        for i in 0..1000 {
            sender.send(envelope(&format!("msg_{i}"))).await.unwrap();
        }

        // Receive all envelopes
        for i in 0..1000 {
            let received = mailbox.recv().await.unwrap();
            assert_eq!(received.payload.as_ref(), format!("msg_{i}").as_bytes());
        }
    }

    #[tokio::test]
    async fn test_unbounded_sender_clone() {
        let (mut mailbox, sender) = UnboundedMailbox::new();

        let sender2 = sender.clone();

        sender.send(envelope("from_sender1")).await.unwrap();
        sender2.send(envelope("from_sender2")).await.unwrap();

        let msg1 = mailbox.recv().await.unwrap();
        let msg2 = mailbox.recv().await.unwrap();

        assert_eq!(msg1.payload.as_ref(), b"from_sender1");
        assert_eq!(msg2.payload.as_ref(), b"from_sender2");
    }

    #[tokio::test]
    async fn test_unbounded_metrics() {
        let (mut mailbox, sender) = UnboundedMailbox::new();

        // Send 5 envelopes
        for i in 0..5 {
            sender.send(envelope(&format!("msg_{i}"))).await.unwrap();
        }

        // Check metrics after sending
        assert_eq!(mailbox.metrics.sent_count(), 5);
        assert_eq!(mailbox.metrics.received_count(), 0);

        // Receive 3 envelopes
        for _ in 0..3 {
            mailbox.recv().await.unwrap();
        }

        // Check metrics after receiving
        assert_eq!(mailbox.metrics.received_count(), 3);
    }

    #[tokio::test]
    async fn test_unbounded_closed_mailbox() {
        let (mut mailbox, sender) = UnboundedMailbox::new();

        // Drop sender to close mailbox
        drop(sender);

        // recv should return None when closed and empty
        let result = mailbox.recv().await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_unbounded_closed_sender() {
        let (mailbox, sender) = UnboundedMailbox::new();

        // Drop receiver to close channel
        drop(mailbox);

        // Send should fail with Closed error
        let result = sender.send(envelope("test")).await;

        assert!(matches!(result, Err(MailboxError::Closed)));
    }

    #[tokio::test]
    async fn test_unbounded_capacity_reporting() {
        let (mailbox, _sender) = UnboundedMailbox::new();

        // Unbounded mailbox always reports Unbounded capacity
        assert_eq!(mailbox.capacity(), MailboxCapacity::Unbounded);
    }

    #[tokio::test]
    async fn test_unbounded_high_volume() {
        let (mut mailbox, sender) = UnboundedMailbox::new();

        // Send 10,000 envelopes to test unbounded behavior
        for i in 0..10_000 {
            sender.send(envelope(&format!("msg_{i}"))).await.unwrap();
        }

        // Verify all envelopes received
        for i in 0..10_000 {
            let received = mailbox.recv().await.unwrap();
            assert_eq!(received.payload.as_ref(), format!("msg_{i}").as_bytes());
        }
    }
}
