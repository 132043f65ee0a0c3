// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use bytes::Bytes;
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Layer 3: Internal module imports
use crate::util::{ActorInstanceId, ActorKey, ActorType, MessageId};

/// Wire-level flags carried alongside an [`Envelope`]'s payload.
///
/// Flags are independent booleans rather than an enum because a single envelope can be,
/// for example, both a reply and a one-way notification is never possible, but
/// `is_reminder` and `is_reply` are orthogonal enough that an enum would force artificial
/// combinations; kept as a flat struct to stay cheap to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvelopeFlags {
    /// Set when this envelope is a reply to an earlier request, not a fresh invocation.
    pub is_reply: bool,
    /// Set when this envelope was generated by the reminder service rather than a caller.
    pub is_reminder: bool,
    /// Set when the caller does not expect a reply (fire-and-forget).
    pub one_way: bool,
    /// Set on a reply envelope whose `payload` is a serialized `ErrorKind`, not a normal
    /// method result.
    pub is_error: bool,
}

/// The single message unit that crosses every boundary in this crate: mailbox, dead-letter
/// queue, transport, and reminder delivery all operate on `Envelope`.
///
/// Unlike [`crate::message::Message`], which stays generic per the crate's zero-cost design,
/// `Envelope` is deliberately concrete: the virtual-actor runtime must route, store, and
/// retry requests whose payload type it never sees at compile time, so the payload is carried
/// as opaque [`Bytes`] and decoded by the target actor's method dispatcher. Field identity on
/// the wire is logical (name, type, ordinal); `Envelope` itself never interprets `payload`.
///
/// # Example
/// ```rust
/// use meshforge::message::Envelope;
///
/// let envelope = Envelope::new("cart", "user-42", "add_item", b"...".to_vec().into());
/// assert_eq!(envelope.routing_key().to_string(), "cart:user-42");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Unique id for this envelope, used for DLQ keying and deduplication.
    pub message_id: MessageId,

    /// Correlation id linking a request to its reply, when one is expected.
    pub correlation_id: Option<Uuid>,

    /// Creation timestamp (§3.2 chrono standard).
    pub timestamp: DateTime<Utc>,

    /// Target actor's declared type.
    pub actor_type: ActorType,

    /// Target actor's instance id.
    pub actor_id: ActorInstanceId,

    /// Name of the method being invoked on the target actor.
    pub method_name: String,

    /// Opaque, codec-encoded argument payload.
    pub payload: Bytes,

    /// Wire flags (reply/reminder/one-way).
    pub flags: EnvelopeFlags,
}

impl Envelope {
    /// Construct a fresh invocation envelope.
    ///
    /// # Example
    /// ```rust
    /// use meshforge::message::Envelope;
    ///
    /// let envelope = Envelope::new("cart", "user-42", "checkout", Vec::new().into());
    /// assert_eq!(envelope.method_name, "checkout");
    /// assert!(!envelope.flags.is_reply);
    /// ```
    pub fn new(
        actor_type: impl Into<ActorType>,
        actor_id: impl Into<ActorInstanceId>,
        method_name: impl Into<String>,
        payload: Bytes,
    ) -> Self {
        Self {
            message_id: MessageId::new(),
            correlation_id: None,
            timestamp: Utc::now(), // §3.2 chrono standard
            actor_type: actor_type.into(),
            actor_id: actor_id.into(),
            method_name: method_name.into(),
            payload,
            flags: EnvelopeFlags::default(),
        }
    }

    /// Builder method: attach a correlation id linking this envelope to a prior request.
    pub fn with_correlation_id(mut self, id: Uuid) -> Self {
        self.correlation_id = Some(id);
        self
    }

    /// Builder method: mark this envelope as fire-and-forget.
    pub fn with_one_way(mut self) -> Self {
        self.flags.one_way = true;
        self
    }

    /// Builder method: mark this envelope as originating from the reminder service.
    pub fn with_reminder_flag(mut self) -> Self {
        self.flags.is_reminder = true;
        self
    }

    /// The `(actor_type, actor_id)` key this envelope routes to.
    pub fn routing_key(&self) -> ActorKey {
        ActorKey::new(self.actor_type.clone(), self.actor_id.clone())
    }

    /// Build a reply envelope addressed back at this envelope's sender context.
    ///
    /// The reply carries this envelope's `correlation_id` forward (or, if none was set, its
    /// own `message_id`, so a one-way call can still be correlated by the caller if it chooses
    /// to wait for a response) and is routed back to the same `(actor_type, actor_id)` pair the
    /// original request targeted, since replies in this runtime travel through the requester's
    /// own mailbox rather than a separate reply channel.
    pub fn reply(&self, payload: Bytes) -> Self {
        let correlation_id = self.correlation_id.unwrap_or_else(|| *self.message_id.as_uuid());
        Self {
            message_id: MessageId::new(),
            correlation_id: Some(correlation_id),
            timestamp: Utc::now(),
            actor_type: self.actor_type.clone(),
            actor_id: self.actor_id.clone(),
            method_name: self.method_name.clone(),
            payload,
            flags: EnvelopeFlags {
                is_reply: true,
                ..EnvelopeFlags::default()
            },
        }
    }

    /// Build an error reply carrying `kind` serialized as JSON in the payload, with
    /// `flags.is_error` set so the caller knows to decode it as an [`crate::message::ErrorKind`]
    /// rather than a normal method result.
    pub fn reply_error(&self, kind: &crate::message::ErrorKind) -> Self {
        let payload = serde_json::to_vec(kind).unwrap_or_default();
        let mut reply = self.reply(Bytes::from(payload));
        reply.flags.is_error = true;
        reply
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Envelope({} -> {}::{})",
            self.message_id.as_uuid(),
            self.routing_key(),
            self.method_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_creation() {
        let envelope = Envelope::new("cart", "user-42", "add_item", Bytes::new());

        assert_eq!(envelope.actor_type.as_str(), "cart");
        assert_eq!(envelope.actor_id.as_str(), "user-42");
        assert_eq!(envelope.method_name, "add_item");
        assert!(envelope.correlation_id.is_none());
        assert!(!envelope.flags.is_reply);
        assert!(!envelope.flags.is_reminder);
        assert!(!envelope.flags.one_way);
    }

    #[test]
    fn test_routing_key() {
        let envelope = Envelope::new("cart", "user-42", "add_item", Bytes::new());
        assert_eq!(envelope.routing_key().to_string(), "cart:user-42");
    }

    #[test]
    fn test_builder_pattern_chaining() {
        let correlation_id = Uuid::new_v4();
        let envelope = Envelope::new("cart", "user-42", "add_item", Bytes::new())
            .with_correlation_id(correlation_id)
            .with_one_way();

        assert_eq!(envelope.correlation_id, Some(correlation_id));
        assert!(envelope.flags.one_way);
    }

    #[test]
    fn test_reminder_flag() {
        let envelope = Envelope::new("cart", "user-42", "expire", Bytes::new()).with_reminder_flag();
        assert!(envelope.flags.is_reminder);
    }

    #[test]
    fn test_reply_preserves_correlation_id() {
        let correlation_id = Uuid::new_v4();
        let request = Envelope::new("cart", "user-42", "add_item", Bytes::new())
            .with_correlation_id(correlation_id);

        let response = request.reply(Bytes::from_static(b"ok"));

        assert_eq!(response.correlation_id, Some(correlation_id));
        assert!(response.flags.is_reply);
        assert_eq!(response.routing_key(), request.routing_key());
    }

    #[test]
    fn test_reply_without_prior_correlation_id_uses_message_id() {
        let request = Envelope::new("cart", "user-42", "add_item", Bytes::new());
        let response = request.reply(Bytes::from_static(b"ok"));

        assert_eq!(response.correlation_id, Some(*request.message_id.as_uuid()));
    }

    #[test]
    fn test_display_contains_routing_key_and_method() {
        let envelope = Envelope::new("cart", "user-42", "add_item", Bytes::new());
        let text = envelope.to_string();

        assert!(text.contains("cart:user-42"));
        assert!(text.contains("add_item"));
    }
}
