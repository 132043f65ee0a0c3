//! Per-invocation actor context: identity, timing, and reminder/stream handles.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY

// Layer 3: Internal module imports
use crate::util::{ActorKey, SiloId};

/// Context handed to an actor on every turn.
///
/// Unlike the teacher's `ActorContext<M, B>`, this carries no broker generic: a virtual actor
/// doesn't know at compile time which other actor types it might address, so cross-actor
/// sends go through the silo's router, reached via [`crate::system::Silo`] rather than a
/// type parameter threaded through every actor implementation.
pub struct ActorContext {
    key: ActorKey,
    local_silo: SiloId,
    created_at: DateTime<Utc>,
}

impl ActorContext {
    /// Create a context for an actor identified by `key`, activated on `local_silo`.
    pub fn new(key: ActorKey, local_silo: SiloId) -> Self {
        Self {
            key,
            local_silo,
            created_at: Utc::now(), // §3.2
        }
    }

    /// The `(actor_type, actor_id)` this context belongs to.
    pub fn key(&self) -> &ActorKey {
        &self.key
    }

    /// The silo this actor instance is currently activated on.
    pub fn local_silo(&self) -> &SiloId {
        &self.local_silo
    }

    /// When this context (and thus the actor's current activation) was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_exposes_key_and_silo() {
        let ctx = ActorContext::new(ActorKey::new("cart", "user-1"), SiloId::new("silo-a"));
        assert_eq!(ctx.key().to_string(), "cart:user-1");
        assert_eq!(ctx.local_silo(), &SiloId::new("silo-a"));
    }
}
