// Layer 1: Standard library imports
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use tokio::time::sleep;

// Layer 3: Internal module imports
use super::error::RouterError;
use crate::directory::ActorDirectory;
use crate::message::ErrorKind;
use crate::ring::HashRing;
use crate::util::{ActorKey, SiloId};

/// Configuration governing retry behavior when a routing guess turns out to be stale.
#[derive(Debug, Clone, Copy)]
pub struct RouterConfig {
    /// Maximum number of routing attempts before giving up with [`RouterError::RetriesExhausted`].
    pub max_attempts: u32,
    /// Linear backoff applied between retries (attempt `n` waits `n * base_delay`).
    pub base_delay: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(50),
        }
    }
}

/// The outcome of a single routing decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecision {
    /// The silo the envelope should be sent to.
    pub silo_id: SiloId,
    /// Whether `silo_id` is this process's own silo (local-bypass eligible).
    pub is_local: bool,
    /// Whether the decision came from the directory cache rather than the ring.
    pub from_cache: bool,
}

/// Combines the actor directory and the hash ring into a single routing decision, and knows
/// how to retry a call that came back `NotOwner` because the ring moved since the directory
/// entry was cached.
///
/// Unifies what the spec's open question (c) calls the "simple router" (ring + directory
/// only) and the "smart router" (same, plus telemetry) behind one type: statistics are
/// optional, collected by the caller via the `on_retry` hook rather than required state here.
pub struct Router {
    directory: Arc<ActorDirectory>,
    ring: Arc<HashRing>,
    local_silo: SiloId,
    config: RouterConfig,
}

impl Router {
    /// Construct a router over a shared directory and ring.
    pub fn new(
        directory: Arc<ActorDirectory>,
        ring: Arc<HashRing>,
        local_silo: SiloId,
        config: RouterConfig,
    ) -> Self {
        Self {
            directory,
            ring,
            local_silo,
            config,
        }
    }

    /// Decide where `key` should be routed: directory first, ring on a miss.
    pub fn resolve(&self, key: &ActorKey) -> Result<RouteDecision, RouterError> {
        if let Some(silo_id) = self.directory.lookup(key) {
            let is_local = silo_id == self.local_silo;
            return Ok(RouteDecision {
                silo_id,
                is_local,
                from_cache: true,
            });
        }

        let silo_id = self
            .ring
            .route(key)
            .ok_or_else(|| RouterError::ClusterUnavailable(key.clone()))?;
        self.directory.insert(key.clone(), silo_id.clone());
        let is_local = silo_id == self.local_silo;
        Ok(RouteDecision {
            silo_id,
            is_local,
            from_cache: false,
        })
    }

    /// Resolve `key` and invoke `attempt`, re-resolving and retrying when the callee reports
    /// `ErrorKind::NotOwner` (the directory entry was stale), up to `max_attempts`.
    pub async fn resolve_with_retry<F, Fut, T>(
        &self,
        key: &ActorKey,
        mut attempt: F,
    ) -> Result<T, RouterError>
    where
        F: FnMut(SiloId) -> Fut,
        Fut: Future<Output = Result<T, ErrorKind>>,
    {
        for attempt_no in 1..=self.config.max_attempts {
            let decision = self.resolve(key)?;
            match attempt(decision.silo_id.clone()).await {
                Ok(value) => return Ok(value),
                Err(ErrorKind::NotOwner { .. }) => {
                    self.directory.invalidate(key);
                    if attempt_no < self.config.max_attempts {
                        sleep(self.config.base_delay * attempt_no).await;
                    }
                }
                Err(_other) => {
                    // Non-routing errors are the caller's concern; surface as exhausted so the
                    // caller can inspect why via its own error channel.
                    return Err(RouterError::RetriesExhausted {
                        key: key.clone(),
                        attempts: attempt_no,
                    });
                }
            }
        }
        Err(RouterError::RetriesExhausted {
            key: key.clone(),
            attempts: self.config.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn router() -> Router {
        let directory = Arc::new(ActorDirectory::new(Duration::from_secs(60)));
        let ring = Arc::new(HashRing::new(10));
        ring.rebuild([SiloId::new("a"), SiloId::new("b")].iter().map(|s| (s, None)));
        Router::new(directory, ring, SiloId::new("a"), RouterConfig::default())
    }

    #[test]
    fn test_resolve_uses_ring_on_miss() {
        let router = router();
        let decision = router.resolve(&ActorKey::new("cart", "1")).unwrap();
        assert!(!decision.from_cache);
    }

    #[test]
    fn test_resolve_uses_cache_on_hit() {
        let router = router();
        let key = ActorKey::new("cart", "1");
        router.resolve(&key).unwrap();
        let decision = router.resolve(&key).unwrap();
        assert!(decision.from_cache);
    }

    #[test]
    fn test_unavailable_cluster_errors() {
        let directory = Arc::new(ActorDirectory::new(Duration::from_secs(60)));
        let ring = Arc::new(HashRing::new(10));
        let router = Router::new(directory, ring, SiloId::new("a"), RouterConfig::default());

        let result = router.resolve(&ActorKey::new("cart", "1"));
        assert!(matches!(result, Err(RouterError::ClusterUnavailable(_))));
    }

    #[tokio::test]
    async fn test_retry_on_not_owner_eventually_succeeds() {
        let router = router();
        let key = ActorKey::new("cart", "1");
        let attempts = AtomicU32::new(0);

        let result = router
            .resolve_with_retry(&key, |_silo| {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(ErrorKind::NotOwner { current_owner: None })
                    } else {
                        Ok(42)
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(result, 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_routing_error_surfaces_immediately() {
        let router = router();
        let key = ActorKey::new("cart", "1");

        let result: Result<(), RouterError> = router
            .resolve_with_retry(&key, |_silo| async { Err(ErrorKind::NotFound) })
            .await;

        assert!(matches!(
            result,
            Err(RouterError::RetriesExhausted { attempts: 1, .. })
        ));
    }
}
