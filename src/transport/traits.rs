// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::error::TransportError;
use crate::message::Envelope;
use crate::util::SiloId;

/// Cross-silo wire boundary: moves an [`Envelope`] to another silo's process and, for
/// [`Transport::call`], waits for its reply envelope.
///
/// Single async trait split into fire-and-forget `send` vs. request-reply `call`, addressed
/// by [`SiloId`] rather than actor address, since routing to the right actor within the
/// destination process is that silo's own router's job, not the transport's.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fire-and-forget delivery to a remote silo.
    async fn send(&self, target_silo: &SiloId, envelope: Envelope) -> Result<(), TransportError>;

    /// Deliver `envelope` to a remote silo and wait for its reply, up to `timeout`.
    async fn call(
        &self,
        target_silo: &SiloId,
        envelope: Envelope,
        timeout: Duration,
    ) -> Result<Envelope, TransportError>;
}

/// Local-process delivery sink: hands an envelope directly to the target actor's mailbox
/// without going through the wire, used by [`super::bypass::BypassTransport`] when the
/// destination silo is the local one.
#[async_trait]
pub trait LocalDelivery: Send + Sync {
    /// Deliver locally and, if the envelope expects a reply, return it.
    async fn deliver_local(&self, envelope: Envelope) -> Result<Envelope, TransportError>;
}
