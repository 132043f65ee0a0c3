// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use dashmap::DashMap;

// Layer 3: Internal module imports
use super::error::TransportError;
use super::traits::{LocalDelivery, Transport};
use crate::message::Envelope;
use crate::util::SiloId;

/// Single-process [`Transport`] that dispatches directly to registered silo handlers.
///
/// Useful for tests and single-binary deployments that simulate a cluster of silos in one
/// process, addressed by silo rather than actor.
#[derive(Default)]
pub struct InProcessTransport {
    silos: DashMap<SiloId, std::sync::Arc<dyn LocalDelivery>>,
}

impl InProcessTransport {
    /// Create a transport with no registered silos.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a silo's local delivery handler so other "silos" in this process can reach it.
    pub fn register(&self, silo_id: SiloId, handler: std::sync::Arc<dyn LocalDelivery>) {
        self.silos.insert(silo_id, handler);
    }

    /// Deregister a silo, simulating it leaving the cluster.
    pub fn deregister(&self, silo_id: &SiloId) {
        self.silos.remove(silo_id);
    }
}

#[async_trait]
impl Transport for InProcessTransport {
    async fn send(&self, target_silo: &SiloId, envelope: Envelope) -> Result<(), TransportError> {
        let handler = self
            .silos
            .get(target_silo)
            .ok_or_else(|| TransportError::Unreachable(target_silo.clone()))?
            .clone();
        handler.deliver_local(envelope).await.map(|_| ())
    }

    async fn call(
        &self,
        target_silo: &SiloId,
        envelope: Envelope,
        _timeout: Duration,
    ) -> Result<Envelope, TransportError> {
        let handler = self
            .silos
            .get(target_silo)
            .ok_or_else(|| TransportError::Unreachable(target_silo.clone()))?
            .clone();
        handler.deliver_local(envelope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    struct Echo;

    #[async_trait]
    impl LocalDelivery for Echo {
        async fn deliver_local(&self, envelope: Envelope) -> Result<Envelope, TransportError> {
            Ok(envelope.reply(Bytes::from_static(b"pong")))
        }
    }

    #[tokio::test]
    async fn test_send_to_unregistered_silo_is_unreachable() {
        let transport = InProcessTransport::new();
        let result = transport
            .send(&SiloId::new("ghost"), Envelope::new("cart", "u1", "m", Bytes::new()))
            .await;
        assert!(matches!(result, Err(TransportError::Unreachable(_))));
    }

    #[tokio::test]
    async fn test_call_routes_to_registered_silo() {
        let transport = InProcessTransport::new();
        let silo = SiloId::new("silo-b");
        transport.register(silo.clone(), std::sync::Arc::new(Echo));

        let reply = transport
            .call(
                &silo,
                Envelope::new("cart", "u1", "ping", Bytes::new()),
                Duration::from_secs(1),
            )
            .await
            .unwrap();
        assert_eq!(reply.payload, Bytes::from_static(b"pong"));
    }
}
