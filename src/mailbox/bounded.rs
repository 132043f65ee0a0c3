// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{mpsc, Notify};

// Layer 3: Internal module imports
use super::backpressure::BackpressureMode;
use super::metrics::{AtomicMetrics, MetricsRecorder};
use super::traits::{MailboxCapacity, MailboxError, MailboxReceiver, MailboxSender, TryRecvError};
use crate::message::Envelope;

/// Shared queue state between a [`BoundedMailbox`] and its [`BoundedMailboxSender`]s.
///
/// Deliberately a plain `Mutex<VecDeque<_>>` rather than `tokio::sync::mpsc`: the spec's
/// `DropOldest` backpressure mode requires evicting the *head* of the queue from the send
/// side, which an mpsc channel's sender half cannot do. A guarded deque plus two
/// [`Notify`]s (one for "item available", one for "space freed") reproduces the same
/// single-consumer/multi-producer contract `mpsc` gives the rest of the crate.
struct Shared {
    queue: Mutex<VecDeque<Envelope>>,
    capacity: usize,
    item_added: Notify,
    space_freed: Notify,
    closed: AtomicBool,
}

impl Shared {
    fn is_full(&self, queue: &VecDeque<Envelope>) -> bool {
        self.capacity > 0 && queue.len() >= self.capacity
    }
}

/// Bounded mailbox with configurable capacity and backpressure handling.
///
/// # Type Parameters
///
/// * `R` - The metrics recorder implementing [`MetricsRecorder`] (default: [`AtomicMetrics`])
///
/// # Example
///
/// ```rust
/// use meshforge::mailbox::BoundedMailbox;
///
/// let (mailbox, sender) = BoundedMailbox::new(100);
/// ```
pub struct BoundedMailbox<R: MetricsRecorder = AtomicMetrics> {
    shared: Arc<Shared>,
    evicted: Option<mpsc::UnboundedReceiver<Envelope>>,
    pub metrics: Arc<R>,
}

/// Sender for bounded mailbox with backpressure support.
pub struct BoundedMailboxSender<R: MetricsRecorder = AtomicMetrics> {
    shared: Arc<Shared>,
    mode: BackpressureMode,
    evicted: Option<mpsc::UnboundedSender<Envelope>>,
    throttle: Arc<Mutex<VecDeque<Instant>>>,
    pub metrics: Arc<R>,
}

impl<R: MetricsRecorder> Clone for BoundedMailboxSender<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            mode: self.mode,
            evicted: self.evicted.clone(),
            throttle: Arc::clone(&self.throttle),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl<R: MetricsRecorder> BoundedMailbox<R> {
    /// Create a new bounded mailbox with custom metrics recorder.
    pub fn with_metrics(capacity: usize, metrics: R) -> (Self, BoundedMailboxSender<R>) {
        Self::with_backpressure_and_metrics(capacity, BackpressureMode::default(), metrics)
    }

    /// Create a bounded mailbox with custom backpressure mode and metrics recorder.
    ///
    /// Evicted envelopes (from [`BackpressureMode::DropOldest`]) are dropped silently;
    /// use [`Self::with_eviction_sink`] to route them to a dead-letter queue instead.
    pub fn with_backpressure_and_metrics(
        capacity: usize,
        mode: BackpressureMode,
        metrics: R,
    ) -> (Self, BoundedMailboxSender<R>) {
        let shared = Arc::new(Shared {
            queue: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
            capacity,
            item_added: Notify::new(),
            space_freed: Notify::new(),
            closed: AtomicBool::new(false),
        });
        let metrics = Arc::new(metrics);

        let mailbox = Self {
            shared: Arc::clone(&shared),
            evicted: None,
            metrics: Arc::clone(&metrics),
        };

        let sender = BoundedMailboxSender {
            shared,
            mode,
            evicted: None,
            throttle: Arc::new(Mutex::new(VecDeque::new())),
            metrics,
        };

        (mailbox, sender)
    }

    /// Same as [`Self::with_backpressure_and_metrics`], but envelopes evicted under
    /// [`BackpressureMode::DropOldest`] are forwarded on an unbounded channel whose receiving
    /// half is returned alongside the mailbox, so a dead-letter queue can drain it.
    pub fn with_eviction_sink(
        capacity: usize,
        mode: BackpressureMode,
        metrics: R,
    ) -> (Self, BoundedMailboxSender<R>) {
        let (mut mailbox, mut sender) = Self::with_backpressure_and_metrics(capacity, mode, metrics);
        let (tx, rx) = mpsc::unbounded_channel();
        mailbox.evicted = Some(rx);
        sender.evicted = Some(tx);
        (mailbox, sender)
    }

    /// Drain any envelopes evicted by `DropOldest`, if this mailbox was built with
    /// [`Self::with_eviction_sink`]. Returns `None` when no eviction sink was configured.
    pub async fn recv_evicted(&mut self) -> Option<Envelope> {
        match self.evicted.as_mut() {
            Some(rx) => rx.recv().await,
            None => None,
        }
    }
}

impl BoundedMailbox<AtomicMetrics> {
    /// Create a new bounded mailbox with default backpressure mode and `AtomicMetrics`.
    pub fn new(capacity: usize) -> (Self, BoundedMailboxSender<AtomicMetrics>) {
        Self::with_metrics(capacity, AtomicMetrics::new())
    }

    /// Create a bounded mailbox with a custom backpressure mode and `AtomicMetrics`.
    pub fn with_backpressure(
        capacity: usize,
        mode: BackpressureMode,
    ) -> (Self, BoundedMailboxSender<AtomicMetrics>) {
        Self::with_backpressure_and_metrics(capacity, mode, AtomicMetrics::new())
    }
}

impl<R: MetricsRecorder> Drop for BoundedMailbox<R> {
    fn drop(&mut self) {
        self.shared.closed.store(true, Ordering::SeqCst);
        self.shared.space_freed.notify_waiters();
    }
}

#[async_trait]
impl<R: MetricsRecorder> MailboxReceiver for BoundedMailbox<R> {
    type Error = MailboxError;

    async fn recv(&mut self) -> Option<Envelope> {
        loop {
            {
                let mut queue = self.shared.queue.lock();
                if let Some(envelope) = queue.pop_front() {
                    drop(queue);
                    self.shared.space_freed.notify_one();
                    self.metrics.record_received();
                    self.metrics.update_last_message(chrono::Utc::now()); // §3.2
                    return Some(envelope);
                }
            }

            if self.shared.closed.load(Ordering::SeqCst) {
                return None;
            }

            self.shared.item_added.notified().await;
        }
    }

    fn try_recv(&mut self) -> Result<Envelope, TryRecvError> {
        let mut queue = self.shared.queue.lock();
        match queue.pop_front() {
            Some(envelope) => {
                drop(queue);
                self.shared.space_freed.notify_one();
                self.metrics.record_received();
                self.metrics.update_last_message(chrono::Utc::now());
                Ok(envelope)
            }
            None => {
                if self.shared.closed.load(Ordering::SeqCst) {
                    Err(TryRecvError::Closed)
                } else {
                    Err(TryRecvError::Empty)
                }
            }
        }
    }

    fn capacity(&self) -> MailboxCapacity {
        MailboxCapacity::Bounded(self.shared.capacity)
    }

    fn len(&self) -> usize {
        self.shared.queue.lock().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R: MetricsRecorder> BoundedMailboxSender<R> {
    fn admit_under_throttle(&self, n: u32, w: Duration) -> bool {
        let now = Instant::now();
        let mut log = self.throttle.lock();
        while let Some(front) = log.front() {
            if now.duration_since(*front) > w {
                log.pop_front();
            } else {
                break;
            }
        }
        if log.len() < n as usize {
            log.push_back(now);
            true
        } else {
            false
        }
    }

    fn push(&self, envelope: Envelope) -> Result<(), MailboxError> {
        if self.shared.closed.load(Ordering::SeqCst) {
            return Err(MailboxError::Closed);
        }
        self.shared.queue.lock().push_back(envelope);
        self.shared.item_added.notify_one();
        Ok(())
    }

    /// Current queue depth, read from the send side.
    ///
    /// [`MailboxSender`] itself exposes no such accessor (only the receiver half does), but a
    /// host needs to observe queue depth from outside the consumer loop that owns the
    /// receiver, e.g. to answer `queue_depth` during a drain.
    pub fn len(&self) -> usize {
        self.shared.queue.lock().len()
    }

    /// Whether the queue is currently empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the mailbox has been closed (its receiver half dropped).
    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<R: MetricsRecorder + Clone> MailboxSender for BoundedMailboxSender<R> {
    type Error = MailboxError;

    async fn send(&self, envelope: Envelope) -> Result<(), Self::Error> {
        if self.shared.closed.load(Ordering::SeqCst) {
            return Err(MailboxError::Closed);
        }

        match self.mode {
            BackpressureMode::None => {
                self.push(envelope)?;
            }
            BackpressureMode::Block => loop {
                {
                    let mut queue = self.shared.queue.lock();
                    if !self.shared.is_full(&queue) {
                        queue.push_back(envelope);
                        drop(queue);
                        self.shared.item_added.notify_one();
                        break;
                    }
                }
                if self.shared.closed.load(Ordering::SeqCst) {
                    return Err(MailboxError::Closed);
                }
                self.shared.space_freed.notified().await;
            },
            BackpressureMode::DropOldest => {
                let mut queue = self.shared.queue.lock();
                if self.shared.is_full(&queue) {
                    if let Some(evicted) = queue.pop_front() {
                        self.metrics.record_dropped();
                        if let Some(sink) = &self.evicted {
                            let _ = sink.send(evicted);
                        }
                    }
                }
                queue.push_back(envelope);
                drop(queue);
                self.shared.item_added.notify_one();
            }
            BackpressureMode::DropNewest => {
                let mut queue = self.shared.queue.lock();
                if self.shared.is_full(&queue) {
                    self.metrics.record_dropped();
                    return Ok(());
                }
                queue.push_back(envelope);
                drop(queue);
                self.shared.item_added.notify_one();
            }
            BackpressureMode::Throttle { n, w } => {
                loop {
                    if self.admit_under_throttle(n, w) {
                        break;
                    }
                    if self.shared.closed.load(Ordering::SeqCst) {
                        return Err(MailboxError::Closed);
                    }
                    let wait = self
                        .throttle
                        .lock()
                        .front()
                        .map(|oldest| w.saturating_sub(Instant::now().duration_since(*oldest)));
                    match wait {
                        Some(remaining) if !remaining.is_zero() => tokio::time::sleep(remaining).await,
                        _ => tokio::task::yield_now().await,
                    }
                }
                self.push(envelope)?;
            }
        }

        self.metrics.record_sent();
        Ok(())
    }

    fn try_send(&self, envelope: Envelope) -> Result<(), Self::Error> {
        if self.shared.closed.load(Ordering::SeqCst) {
            return Err(MailboxError::Closed);
        }

        match self.mode {
            BackpressureMode::Throttle { n, w } if !self.admit_under_throttle(n, w) => {
                return Err(MailboxError::Full {
                    capacity: self.shared.capacity,
                });
            }
            _ => {}
        }

        let mut queue = self.shared.queue.lock();
        if self.shared.is_full(&queue) {
            match self.mode {
                BackpressureMode::DropOldest => {
                    if let Some(evicted) = queue.pop_front() {
                        self.metrics.record_dropped();
                        if let Some(sink) = &self.evicted {
                            let _ = sink.send(evicted);
                        }
                    }
                }
                BackpressureMode::DropNewest => {
                    self.metrics.record_dropped();
                    return Ok(());
                }
                BackpressureMode::None => {}
                _ => {
                    return Err(MailboxError::Full {
                        capacity: self.shared.capacity,
                    });
                }
            }
        }
        queue.push_back(envelope);
        drop(queue);
        self.shared.item_added.notify_one();

        self.metrics.record_sent();
        Ok(())
    }
}
