// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// Layer 3: Internal module imports
use super::error::ClusterError;
use crate::ring::Tier;
use crate::util::SiloId;

/// Liveness status of a cluster member, derived from how recently it heartbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiloStatus {
    /// Heartbeating within the configured liveness window.
    Alive,
    /// Missed enough heartbeats to be suspected dead but not yet evicted.
    Suspect,
    /// Evicted from the ring; no longer routed to.
    Dead,
}

/// A cluster member's descriptor: identity, tier, and the last time it was heard from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiloDescriptor {
    /// Stable identity of the silo.
    pub silo_id: SiloId,
    /// Optional hierarchical placement tier.
    pub tier: Option<Tier>,
    /// Timestamp of the most recent heartbeat (§3.2 chrono standard).
    pub last_heartbeat: DateTime<Utc>,
    /// Derived liveness status.
    pub status: SiloStatus,
}

/// A membership change a [`ClusterStore`] emits on its event stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClusterEvent {
    /// A silo joined the cluster.
    Joined(SiloId),
    /// A silo cleanly left the cluster.
    Left(SiloId),
    /// A silo missed enough heartbeats to be marked suspect.
    Suspected(SiloId),
    /// A suspect silo was evicted as dead.
    Evicted(SiloId),
}

/// External contract for persisting and observing cluster membership.
///
/// A production deployment backs this with its coordination service of choice (etcd,
/// Consul, a gossip protocol); [`InMemoryClusterStore`] is the in-process reference used by
/// tests and single-process deployments.
#[async_trait]
pub trait ClusterStore: Send + Sync {
    /// Register a new member, or return [`ClusterError::AlreadyJoined`] if already present.
    async fn join(&self, silo_id: SiloId, tier: Option<Tier>) -> Result<(), ClusterError>;

    /// Remove a member cleanly (graceful shutdown).
    async fn leave(&self, silo_id: &SiloId) -> Result<(), ClusterError>;

    /// Record a heartbeat for a member, resetting its liveness window.
    async fn heartbeat(&self, silo_id: &SiloId) -> Result<(), ClusterError>;

    /// Evaluate liveness windows and transition stale members to `Suspect`/`Dead`, returning
    /// the events produced.
    async fn sweep(&self, suspect_after: Duration, evict_after: Duration) -> Vec<ClusterEvent>;

    /// Current view of all known members (any status).
    async fn members(&self) -> Vec<SiloDescriptor>;

    /// Subscribe to the membership event stream.
    fn subscribe(&self) -> broadcast::Receiver<ClusterEvent>;
}

/// In-memory reference [`ClusterStore`], backed by a [`DashMap`] and a broadcast channel for
/// join/leave/suspect/evict notifications — the same registry-plus-fan-out shape the stream
/// broker uses for its subscriber table.
pub struct InMemoryClusterStore {
    members: DashMap<SiloId, SiloDescriptor>,
    events: broadcast::Sender<ClusterEvent>,
}

impl InMemoryClusterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            members: DashMap::new(),
            events,
        }
    }
}

impl Default for InMemoryClusterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClusterStore for InMemoryClusterStore {
    async fn join(&self, silo_id: SiloId, tier: Option<Tier>) -> Result<(), ClusterError> {
        if self.members.contains_key(&silo_id) {
            return Err(ClusterError::AlreadyJoined(silo_id));
        }
        self.members.insert(
            silo_id.clone(),
            SiloDescriptor {
                silo_id: silo_id.clone(),
                tier,
                last_heartbeat: Utc::now(), // §3.2
                status: SiloStatus::Alive,
            },
        );
        let _ = self.events.send(ClusterEvent::Joined(silo_id));
        Ok(())
    }

    async fn leave(&self, silo_id: &SiloId) -> Result<(), ClusterError> {
        self.members
            .remove(silo_id)
            .ok_or_else(|| ClusterError::UnknownSilo(silo_id.clone()))?;
        let _ = self.events.send(ClusterEvent::Left(silo_id.clone()));
        Ok(())
    }

    async fn heartbeat(&self, silo_id: &SiloId) -> Result<(), ClusterError> {
        let mut entry = self
            .members
            .get_mut(silo_id)
            .ok_or_else(|| ClusterError::UnknownSilo(silo_id.clone()))?;
        entry.last_heartbeat = Utc::now();
        entry.status = SiloStatus::Alive;
        Ok(())
    }

    async fn sweep(&self, suspect_after: Duration, evict_after: Duration) -> Vec<ClusterEvent> {
        let now = Utc::now();
        let mut events = Vec::new();
        let mut to_evict = Vec::new();

        for mut entry in self.members.iter_mut() {
            let age = now.signed_duration_since(entry.last_heartbeat);
            let age = age.to_std().unwrap_or(Duration::ZERO);

            if age >= evict_after && entry.status != SiloStatus::Dead {
                entry.status = SiloStatus::Dead;
                events.push(ClusterEvent::Evicted(entry.silo_id.clone()));
                to_evict.push(entry.silo_id.clone());
            } else if age >= suspect_after && entry.status == SiloStatus::Alive {
                entry.status = SiloStatus::Suspect;
                events.push(ClusterEvent::Suspected(entry.silo_id.clone()));
            }
        }

        for silo_id in &to_evict {
            self.members.remove(silo_id);
        }

        for event in &events {
            let _ = self.events.send(event.clone());
        }
        events
    }

    async fn members(&self) -> Vec<SiloDescriptor> {
        self.members.iter().map(|e| e.value().clone()).collect()
    }

    fn subscribe(&self) -> broadcast::Receiver<ClusterEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_join_and_members() {
        let store = InMemoryClusterStore::new();
        store.join(SiloId::new("a"), None).await.unwrap();

        let members = store.members().await;
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].status, SiloStatus::Alive);
    }

    #[tokio::test]
    async fn test_double_join_errors() {
        let store = InMemoryClusterStore::new();
        store.join(SiloId::new("a"), None).await.unwrap();
        let result = store.join(SiloId::new("a"), None).await;
        assert!(matches!(result, Err(ClusterError::AlreadyJoined(_))));
    }

    #[tokio::test]
    async fn test_leave_unknown_errors() {
        let store = InMemoryClusterStore::new();
        let result = store.leave(&SiloId::new("ghost")).await;
        assert!(matches!(result, Err(ClusterError::UnknownSilo(_))));
    }

    #[tokio::test]
    async fn test_sweep_marks_suspect_then_evicts() {
        let store = InMemoryClusterStore::new();
        store.join(SiloId::new("a"), None).await.unwrap();

        // Force staleness by adjusting the stored heartbeat directly.
        {
            let mut entry = store.members.get_mut(&SiloId::new("a")).unwrap();
            entry.last_heartbeat = Utc::now() - chrono::Duration::seconds(10);
        }

        let events = store
            .sweep(Duration::from_secs(5), Duration::from_secs(20))
            .await;
        assert!(matches!(events[0], ClusterEvent::Suspected(_)));

        {
            let mut entry = store.members.get_mut(&SiloId::new("a")).unwrap();
            entry.last_heartbeat = Utc::now() - chrono::Duration::seconds(30);
        }
        let events = store
            .sweep(Duration::from_secs(5), Duration::from_secs(20))
            .await;
        assert!(matches!(events[0], ClusterEvent::Evicted(_)));
        assert!(store.members().await.is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_receives_join_event() {
        let store = InMemoryClusterStore::new();
        let mut rx = store.subscribe();

        store.join(SiloId::new("a"), None).await.unwrap();

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, ClusterEvent::Joined(_)));
    }
}
