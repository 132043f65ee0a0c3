//! Named, multi-subscriber streams for pub/sub fan-out over [`Envelope`]s.
//!
//! Distinct from [`crate::router::Router`]'s point-to-point placement: a stream has many
//! subscribers, each receiving every published envelope, rather than exactly one recipient.
//! Grounded on a DashMap-backed routing table (lock-free lookup, lazily created entries)
//! generalized from per-actor-address routing to per-stream-id fan-out, with
//! `tokio::sync::broadcast` standing in for a single mailbox sender per entry.

// Layer 1: Standard library imports
use std::fmt;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

// Layer 3: Internal module imports
use super::error::BrokerError;
use crate::mailbox::BackpressureMode;
use crate::message::Envelope;
use crate::util::{ActorKey, ActorType};

/// Hook used to deliver an implicit-subscription envelope into an actor's mailbox, keeping
/// [`StreamBroker`] decoupled from `ActorHost` the same way [`crate::migration::Drainable`]
/// and [`crate::reminder::ReminderSink`] keep their callers decoupled from the host.
#[async_trait]
pub trait ImplicitSubscriber: Send + Sync {
    /// Activate (or reuse) `key` and post `envelope` through its mailbox.
    async fn post(&self, key: ActorKey, envelope: Envelope);
}

/// Identifies a named stream: either an operator-defined namespace/key pair, or the implicit
/// per-actor-type stream every published envelope also fans out to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamId(String);

impl StreamId {
    /// Create a stream id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The implicit stream every envelope addressed to `actor_type` is also published to,
    /// so a subscriber can observe "everything happening to carts" without naming a stream
    /// up front.
    pub fn for_actor_type(actor_type: &ActorType) -> Self {
        Self(format!("type:{actor_type}"))
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry of named streams and their broadcast channels.
///
/// Channels are created lazily on first publish or subscribe and kept for the registry's
/// lifetime; a stream with no current subscribers simply drops what it publishes, matching
/// `broadcast::Sender`'s own semantics.
pub struct StreamBroker {
    streams: DashMap<StreamId, broadcast::Sender<Envelope>>,
    default_capacity: usize,
    /// Namespaces bound to auto-activate an actor type on publish, with that namespace's
    /// own backpressure mode.
    implicit: DashMap<StreamId, (ActorType, BackpressureMode)>,
    activator: Option<Arc<dyn ImplicitSubscriber>>,
}

impl StreamBroker {
    /// Create a broker whose streams default to `default_capacity` buffered envelopes per
    /// subscriber before the slowest subscriber starts lagging (and misses messages).
    pub fn new(default_capacity: usize) -> Self {
        Self {
            streams: DashMap::new(),
            default_capacity,
            implicit: DashMap::new(),
            activator: None,
        }
    }

    /// Attach the hook used to deliver envelopes into an implicit subscriber's mailbox.
    pub fn with_implicit_subscriber(mut self, activator: Arc<dyn ImplicitSubscriber>) -> Self {
        self.activator = Some(activator);
        self
    }

    /// Bind `actor_type` as the implicit subscriber of `namespace`: every publish to this
    /// namespace activates (or reuses) `actor_id = envelope.actor_id` and posts through its
    /// mailbox instead of (or alongside) fanning out over broadcast, applying `backpressure`
    /// as this namespace's own mode.
    pub fn bind_implicit_subscriber(
        &self,
        namespace: StreamId,
        actor_type: ActorType,
        backpressure: BackpressureMode,
    ) {
        self.implicit.insert(namespace, (actor_type, backpressure));
    }

    /// The backpressure mode registered for `namespace`, if any implicit subscriber is bound.
    pub fn implicit_backpressure_for(&self, namespace: &StreamId) -> Option<BackpressureMode> {
        self.implicit.get(namespace).map(|entry| entry.1)
    }

    fn sender_for(&self, stream: &StreamId) -> broadcast::Sender<Envelope> {
        self.streams
            .entry(stream.clone())
            .or_insert_with(|| broadcast::channel(self.default_capacity).0)
            .clone()
    }

    /// Publish `envelope` to `stream`, and implicitly to its actor type's stream as well (a
    /// no-op duplicate publish is skipped when `stream` already *is* the type stream).
    ///
    /// Returns the number of subscribers the primary `stream` reached; dropping the receiver
    /// half entirely (no subscribers) is not an error, mirroring `broadcast::Sender::send`.
    pub fn publish(&self, stream: &StreamId, envelope: Envelope) -> usize {
        let type_stream = StreamId::for_actor_type(&envelope.actor_type);
        self.deliver_implicit(stream, &envelope);
        let reached = self.sender_for(stream).send(envelope.clone()).unwrap_or(0);
        if type_stream != *stream {
            self.deliver_implicit(&type_stream, &envelope);
            let _ = self.sender_for(&type_stream).send(envelope);
        }
        reached
    }

    /// If `stream` has a bound implicit subscriber, activate it and post `envelope` through
    /// its mailbox, preserving that actor's turn ordering for this publisher.
    fn deliver_implicit(&self, stream: &StreamId, envelope: &Envelope) {
        let Some(activator) = self.activator.clone() else {
            return;
        };
        let Some(entry) = self.implicit.get(stream) else {
            return;
        };
        let key = ActorKey::new(entry.0.clone(), envelope.actor_id.clone());
        let envelope = envelope.clone();
        tokio::spawn(async move {
            activator.post(key, envelope).await;
        });
    }

    /// Subscribe to `stream`, creating it if it doesn't exist yet.
    pub fn subscribe(&self, stream: &StreamId) -> StreamSubscription {
        StreamSubscription {
            receiver: self.sender_for(stream).subscribe(),
        }
    }

    /// Current subscriber count for `stream`, or 0 if it has never been published to or
    /// subscribed on.
    pub fn subscriber_count(&self, stream: &StreamId) -> usize {
        self.streams.get(stream).map(|s| s.receiver_count()).unwrap_or(0)
    }
}

impl Default for StreamBroker {
    fn default() -> Self {
        Self::new(256)
    }
}

/// A live handle to one stream's broadcast channel.
pub struct StreamSubscription {
    receiver: broadcast::Receiver<Envelope>,
}

impl StreamSubscription {
    /// Await the next published envelope, or `None` once the broker itself is dropped.
    ///
    /// Lagging past the channel's capacity returns [`BrokerError::Lagged`] rather than
    /// silently resyncing, so a slow subscriber finds out it missed messages.
    pub async fn recv(&mut self) -> Result<Envelope, BrokerError> {
        self.receiver.recv().await.map_err(|e| match e {
            broadcast::error::RecvError::Closed => BrokerError::StreamClosed,
            broadcast::error::RecvError::Lagged(n) => BrokerError::Lagged(n),
        })
    }

    /// Convert into a `futures`/`tokio-stream`-compatible [`futures::Stream`], for callers that
    /// want to chain combinators (`.map()`, `.filter()`, ...) rather than poll `recv` manually.
    pub fn into_broadcast_stream(self) -> BroadcastStream<Envelope> {
        BroadcastStream::new(self.receiver)
    }
}

/// Lazy, iterator-based operators over a drained batch of envelopes.
///
/// Kept as plain iterator adaptors rather than a custom async `Stream` combinator chain: Rust's
/// iterator methods are already lazy (no work happens until the caller consumes the result), and
/// a hand-rolled streaming operator pipeline would be speculative complexity this crate's
/// reference stream broker does not need.
pub mod operators {
    use super::Envelope;
    use crate::util::ActorType;
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;

    /// Lazily transform each envelope in `envelopes`.
    pub fn map<T>(
        envelopes: impl IntoIterator<Item = Envelope>,
        f: impl FnMut(Envelope) -> T,
    ) -> impl Iterator<Item = T> {
        envelopes.into_iter().map(f)
    }

    /// Lazily keep only envelopes matching `predicate`.
    pub fn filter(
        envelopes: impl IntoIterator<Item = Envelope>,
        mut predicate: impl FnMut(&Envelope) -> bool,
    ) -> impl Iterator<Item = Envelope> {
        envelopes.into_iter().filter(move |e| predicate(e))
    }

    /// Fold `envelopes` into a single accumulated value.
    pub fn reduce<T>(
        envelopes: impl IntoIterator<Item = Envelope>,
        init: T,
        f: impl FnMut(T, Envelope) -> T,
    ) -> T {
        envelopes.into_iter().fold(init, f)
    }

    /// Chunk `envelopes` into fixed-size, non-overlapping windows (the last chunk may be
    /// shorter).
    pub fn window(envelopes: impl IntoIterator<Item = Envelope>, size: usize) -> Vec<Vec<Envelope>> {
        assert!(size > 0, "window size must be > 0");
        let mut chunks = Vec::new();
        let mut current = Vec::with_capacity(size);
        for envelope in envelopes {
            current.push(envelope);
            if current.len() == size {
                chunks.push(std::mem::replace(&mut current, Vec::with_capacity(size)));
            }
        }
        if !current.is_empty() {
            chunks.push(current);
        }
        chunks
    }

    /// Chunk `envelopes` (assumed already ordered by timestamp) into non-overlapping windows
    /// of `duration` each, measured from the first envelope's timestamp in each window.
    pub fn window_by_duration(
        envelopes: impl IntoIterator<Item = Envelope>,
        duration: chrono::Duration,
    ) -> Vec<Vec<Envelope>> {
        assert!(duration > chrono::Duration::zero(), "window duration must be > 0");
        let mut chunks: Vec<Vec<Envelope>> = Vec::new();
        let mut window_start: Option<DateTime<Utc>> = None;
        for envelope in envelopes {
            let start = *window_start.get_or_insert(envelope.timestamp);
            if envelope.timestamp - start >= duration {
                window_start = Some(envelope.timestamp);
                chunks.push(vec![envelope]);
            } else if let Some(current) = chunks.last_mut() {
                current.push(envelope);
            } else {
                chunks.push(vec![envelope]);
            }
        }
        chunks
    }

    /// Overlapping windows of `size` envelopes, advancing by one envelope at a time: window
    /// `i` covers envelopes `[i, i + size)`. The final, shorter windows are omitted, since a
    /// partial sliding window cannot be compared against full ones.
    pub fn window_sliding(envelopes: impl IntoIterator<Item = Envelope>, size: usize) -> Vec<Vec<Envelope>> {
        assert!(size > 0, "window size must be > 0");
        let items: Vec<Envelope> = envelopes.into_iter().collect();
        if items.len() < size {
            return Vec::new();
        }
        (0..=items.len() - size).map(|start| items[start..start + size].to_vec()).collect()
    }

    /// Group envelopes into sessions: a new session starts whenever the gap since the
    /// previous envelope's timestamp is at least `gap`.
    pub fn window_session(
        envelopes: impl IntoIterator<Item = Envelope>,
        gap: chrono::Duration,
    ) -> Vec<Vec<Envelope>> {
        assert!(gap > chrono::Duration::zero(), "session gap must be > 0");
        let mut chunks: Vec<Vec<Envelope>> = Vec::new();
        let mut last_seen: Option<DateTime<Utc>> = None;
        for envelope in envelopes {
            let starts_new_session = match last_seen {
                Some(prev) => envelope.timestamp - prev >= gap,
                None => true,
            };
            last_seen = Some(envelope.timestamp);
            if starts_new_session || chunks.is_empty() {
                chunks.push(vec![envelope]);
            } else if let Some(current) = chunks.last_mut() {
                current.push(envelope);
            }
        }
        chunks
    }

    /// Group envelopes by their target actor type, preserving per-group arrival order.
    pub fn group_by_actor_type(
        envelopes: impl IntoIterator<Item = Envelope>,
    ) -> HashMap<ActorType, Vec<Envelope>> {
        let mut groups: HashMap<ActorType, Vec<Envelope>> = HashMap::new();
        for envelope in envelopes {
            groups.entry(envelope.actor_type.clone()).or_default().push(envelope);
        }
        groups
    }
}
