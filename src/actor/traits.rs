//! The dyn-compatible `Actor` trait actors implement, and the `ErrorAction` supervision enum.
//!
//! # Design Philosophy
//!
//! The rest of this crate avoids `dyn` in favor of generic constraints over a concrete
//! [`crate::message::Envelope`] (see that module's doc comment for the rationale). `Actor` is the
//! one deliberate exception: a silo's [`crate::actor::host::ActorHost`] must register
//! arbitrarily many actor *types* at runtime, keyed by a string `actor_type` read off the wire,
//! so there is no way to monomorphize over "every actor type this process will ever host."
//! Each `Box<dyn Actor>` still wraps an ordinary, non-generic implementation; the type erasure
//! is confined to this one registration boundary.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use bytes::Bytes;

// Layer 3: Internal module imports
use super::context::ActorContext;
use crate::message::ErrorKind;

/// Error returned from an actor's message handler or lifecycle hook.
#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    /// The envelope's `method_name` has no handler on this actor type.
    #[error("unknown method {0:?}")]
    UnknownMethod(String),

    /// No actor type is registered under this name on the host.
    #[error("unknown actor type {0:?}")]
    UnknownActorType(String),

    /// The actor's own business logic rejected the call.
    #[error("actor error: {0}")]
    User(String),

    /// The payload could not be decoded into the expected argument type.
    #[error("decode error: {0}")]
    Decode(String),

    /// The activation is draining for migration and refuses new turns.
    #[error("activation {0} is draining")]
    Draining(String),

    /// The activation's mailbox has already been closed.
    #[error("mailbox closed for {0}")]
    MailboxClosed(String),

    /// The activation's mailbox is at capacity and its backpressure mode rejected this turn.
    #[error("mailbox full for {0}")]
    MailboxFull(String),
}

impl From<ActorError> for ErrorKind {
    fn from(error: ActorError) -> Self {
        match error {
            ActorError::UnknownMethod(m) => ErrorKind::User {
                payload: m.into_bytes(),
            },
            ActorError::UnknownActorType(t) => ErrorKind::User {
                payload: t.into_bytes(),
            },
            ActorError::User(msg) => ErrorKind::User {
                payload: msg.into_bytes(),
            },
            ActorError::Decode(msg) => ErrorKind::User {
                payload: msg.into_bytes(),
            },
            ActorError::Draining(_) => ErrorKind::Draining,
            ActorError::MailboxClosed(_) => ErrorKind::Closed,
            ActorError::MailboxFull(_) => ErrorKind::RateLimited,
        }
    }
}

/// A virtual actor: hosts business logic for one `(actor_type, actor_id)` activation.
///
/// Unlike the teacher's `Actor<Message = M>`, this trait is not generic over a message type:
/// every call arrives as an opaque method name plus encoded payload, since the host does not
/// know at compile time which methods a dynamically-registered actor type exposes. Dispatch
/// from `method_name` to concrete business logic is this trait's implementor's job.
#[async_trait]
pub trait Actor: Send + Sync + 'static {
    /// Handle one turn: decode `payload` per `method_name`'s contract, run the actor's logic,
    /// and return an encoded reply (or an empty payload for calls with no meaningful result).
    async fn handle(
        &mut self,
        method_name: &str,
        payload: Bytes,
        context: &mut ActorContext,
    ) -> Result<Bytes, ActorError>;

    /// Lifecycle hook called once, before this activation processes its first turn.
    async fn pre_start(&mut self, _context: &mut ActorContext) -> Result<(), ActorError> {
        Ok(())
    }

    /// Lifecycle hook called once, when this activation is being deactivated (idle timeout,
    /// migration, or silo shutdown).
    async fn post_stop(&mut self, _context: &mut ActorContext) -> Result<(), ActorError> {
        Ok(())
    }

    /// Called when `handle` returns an error; decides how the host should respond.
    ///
    /// Default implementation restarts the activation (`post_stop` then `pre_start`), the
    /// supervision default: a fresh instance gets one chance to recover before anything gives
    /// up on the actor outright.
    async fn on_error(&mut self, _error: &ActorError, _context: &mut ActorContext) -> ErrorAction {
        ErrorAction::Restart
    }
}

/// Supervision decision returned by [`Actor::on_error`].
///
/// Identical in shape and meaning to the teacher's enum: kept verbatim because the spec's
/// failure-handling vocabulary (resume/restart/stop/escalate) is exactly this one.
///
/// # Examples
///
/// ```rust
/// use meshforge::ErrorAction;
///
/// assert_eq!(ErrorAction::default(), ErrorAction::Stop);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    /// Stop the actor permanently; `post_stop` runs and the activation is removed.
    Stop,
    /// Resume processing, ignoring the error.
    Resume,
    /// Restart the actor: `post_stop` then `pre_start` run before the next turn.
    Restart,
    /// Escalate the error to the hosting silo's supervisor.
    Escalate,
}

impl Default for ErrorAction {
    fn default() -> Self {
        Self::Stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::{ActorKey, SiloId};

    struct EchoActor;

    #[async_trait]
    impl Actor for EchoActor {
        async fn handle(
            &mut self,
            method_name: &str,
            payload: Bytes,
            _context: &mut ActorContext,
        ) -> Result<Bytes, ActorError> {
            match method_name {
                "echo" => Ok(payload),
                other => Err(ActorError::UnknownMethod(other.to_string())),
            }
        }
    }

    fn context() -> ActorContext {
        ActorContext::new(ActorKey::new("cart", "user-1"), SiloId::new("silo-a"))
    }

    #[tokio::test]
    async fn test_handle_known_method() {
        let mut actor = EchoActor;
        let result = actor
            .handle("echo", Bytes::from_static(b"hi"), &mut context())
            .await
            .unwrap();
        assert_eq!(result, Bytes::from_static(b"hi"));
    }

    #[tokio::test]
    async fn test_handle_unknown_method() {
        let mut actor = EchoActor;
        let result = actor.handle("nope", Bytes::new(), &mut context()).await;
        assert!(matches!(result, Err(ActorError::UnknownMethod(_))));
    }

    #[tokio::test]
    async fn test_default_on_error_restarts() {
        let mut actor = EchoActor;
        let action = actor
            .on_error(&ActorError::User("boom".to_string()), &mut context())
            .await;
        assert_eq!(action, ErrorAction::Restart);
    }

    #[test]
    fn test_actor_error_converts_to_user_error_kind() {
        let kind: ErrorKind = ActorError::User("boom".to_string()).into();
        assert!(matches!(kind, ErrorKind::User { .. }));
    }

    #[test]
    fn test_error_action_default() {
        assert_eq!(ErrorAction::default(), ErrorAction::Stop);
    }
}
