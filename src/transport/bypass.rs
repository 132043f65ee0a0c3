// Layer 1: Standard library imports
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::error::TransportError;
use super::traits::{LocalDelivery, Transport};
use crate::message::Envelope;
use crate::util::SiloId;

/// Wraps a real [`Transport`] so that calls addressed to the local silo bypass the wire
/// entirely and go straight to `local` instead.
///
/// This is the one place in the runtime that needs to know its own [`SiloId`] to short-circuit
/// routing; every other module treats the local silo the same as any other ring member.
pub struct BypassTransport<T, L> {
    local_silo: SiloId,
    local: Arc<L>,
    remote: Arc<T>,
}

impl<T, L> BypassTransport<T, L>
where
    T: Transport,
    L: LocalDelivery,
{
    /// Wrap `remote`, routing anything addressed to `local_silo` through `local` instead.
    pub fn new(local_silo: SiloId, local: Arc<L>, remote: Arc<T>) -> Self {
        Self {
            local_silo,
            local,
            remote,
        }
    }

    fn is_local(&self, target_silo: &SiloId) -> bool {
        target_silo == &self.local_silo
    }
}

#[async_trait]
impl<T, L> Transport for BypassTransport<T, L>
where
    T: Transport,
    L: LocalDelivery,
{
    async fn send(&self, target_silo: &SiloId, envelope: Envelope) -> Result<(), TransportError> {
        if self.is_local(target_silo) {
            self.local.deliver_local(envelope).await?;
            Ok(())
        } else {
            self.remote.send(target_silo, envelope).await
        }
    }

    async fn call(
        &self,
        target_silo: &SiloId,
        envelope: Envelope,
        timeout: Duration,
    ) -> Result<Envelope, TransportError> {
        if self.is_local(target_silo) {
            self.local.deliver_local(envelope).await
        } else {
            self.remote.call(target_silo, envelope, timeout).await
        }
    }
}
