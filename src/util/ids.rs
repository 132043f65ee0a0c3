// Layer 1: Standard library imports
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Layer 3: Internal module imports
// (none)

/// Unique identifier for actors in the system
///
/// # Performance
/// Uses UUID v4 for globally unique identifiers with excellent collision resistance.
/// Implements cheap cloning via Copy trait.
///
/// # Example
/// ```rust
/// use meshforge::util::ActorId;
///
/// let id1 = ActorId::new();
/// let id2 = ActorId::new();
/// assert_ne!(id1, id2); // Globally unique
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Generate a new random ActorId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create ActorId from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for messages in the system
///
/// # Example
/// ```rust
/// use meshforge::util::MessageId;
///
/// let id = MessageId::new();
/// println!("Message ID: {}", id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Generate a new random MessageId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create MessageId from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Actor address for message routing
///
/// # Design
/// Supports both named and anonymous actors for flexible routing patterns.
/// Named actors can be discovered by name, while anonymous actors are
/// accessible only via their unique ID.
///
/// # Example
/// ```rust
/// use meshforge::util::ActorAddress;
///
/// // Create named actor
/// let supervisor = ActorAddress::named("main_supervisor");
/// assert_eq!(supervisor.name(), Some("main_supervisor"));
///
/// // Create anonymous actor
/// let worker = ActorAddress::anonymous();
/// assert_eq!(worker.name(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorAddress {
    /// Named actor with string identifier
    Named { id: ActorId, name: String },
    /// Anonymous actor with only ID
    Anonymous { id: ActorId },
}

impl ActorAddress {
    /// Create a new named actor address
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            id: ActorId::new(),
            name: name.into(),
        }
    }

    /// Create a new anonymous actor address
    pub fn anonymous() -> Self {
        Self::Anonymous { id: ActorId::new() }
    }

    /// Get the actor ID
    pub fn id(&self) -> &ActorId {
        match self {
            Self::Named { id, .. } => id,
            Self::Anonymous { id } => id,
        }
    }

    /// Get the actor name if available
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name),
            Self::Anonymous { .. } => None,
        }
    }
}

impl Display for ActorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { id, name } => write!(f, "{name}@{id}"),
            Self::Anonymous { id } => write!(f, "anonymous@{id}"),
        }
    }
}

/// Stable identifier for a silo (cluster peer process).
///
/// Unlike [`ActorId`], a silo's identity is chosen by its operator, not generated:
/// `silo_id` is meant to survive process restarts so that reminders, DLQ entries,
/// and directory hints that reference "the silo that owns shard 7" keep meaning
/// across a rolling restart. Ephemeral deployments may still pass a freshly
/// generated UUID string as the id.
///
/// # Example
/// ```rust
/// use meshforge::util::SiloId;
///
/// let a = SiloId::new("silo-us-east-1a");
/// let b = SiloId::new("silo-us-east-1a");
/// assert_eq!(a, b); // stable identity, not randomly generated
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SiloId(String);

impl SiloId {
    /// Create a silo id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, randomly-unique silo id for ephemeral deployments.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SiloId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SiloId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SiloId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// The declared type name of an actor, e.g. `"cart"` or `"user_session"`.
///
/// Actor types are registered with the runtime's actor host and are the first
/// component of the `(actor_type, actor_id)` key the hash ring routes on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorType(String);

impl ActorType {
    /// Create an actor type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ActorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActorType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Client-chosen identity of a specific actor instance, e.g. a user id or cart id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorInstanceId(String);

impl ActorInstanceId {
    /// Create an actor instance id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ActorInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActorInstanceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The full routing key for a virtual actor: `(actor_type, actor_id)`.
///
/// This is what the hash ring hashes, what the directory keys on, and what
/// appears in every envelope. Its `Display` impl (`"type:id"`) is the canonical
/// string form used as the ring's hash input (spec §4.1: `"{actor_type}:{actor_id}"`).
///
/// # Example
/// ```rust
/// use meshforge::util::ActorKey;
///
/// let key = ActorKey::new("cart", "user-42");
/// assert_eq!(key.to_string(), "cart:user-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorKey {
    /// The actor's declared type.
    pub actor_type: ActorType,
    /// The actor's client-chosen instance id.
    pub actor_id: ActorInstanceId,
}

impl ActorKey {
    /// Construct a routing key from a type and id.
    pub fn new(actor_type: impl Into<ActorType>, actor_id: impl Into<ActorInstanceId>) -> Self {
        Self {
            actor_type: actor_type.into(),
            actor_id: actor_id.into(),
        }
    }
}

impl Display for ActorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.actor_type, self.actor_id)
    }
}

/// Primary key for a durable state record: an actor plus which named state it owns.
///
/// One actor can hold several independently versioned state records (e.g. `"cart"` and
/// `"preferences"`), so [`super::super::state::StateStore`] keys on this pair rather than on
/// [`ActorKey`] alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey {
    /// The actor this state record belongs to.
    pub actor_key: ActorKey,
    /// Which named state this is, scoped to the actor.
    pub state_name: String,
}

impl StateKey {
    /// Construct a state key from an actor key and a state name.
    pub fn new(actor_key: ActorKey, state_name: impl Into<String>) -> Self {
        Self {
            actor_key,
            state_name: state_name.into(),
        }
    }
}

impl Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.actor_key, self.state_name)
    }
}
