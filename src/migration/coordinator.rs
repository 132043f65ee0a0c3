// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use dashmap::DashMap;

// Layer 3: Internal module imports
use super::error::MigrationError;
use super::state::{MigrationRecord, MigrationState};
use super::version::{VersionCompatibilityMode, VersionTriple};
use crate::directory::ActorDirectory;
use crate::util::{ActorKey, SiloId};

/// Hook into the actor host that a migration drives through its steps.
///
/// Kept as a small trait, grounded the same way [`crate::reminder::ReminderSink`] is, so the
/// coordinator stays testable without a full `ActorHost`.
#[async_trait]
pub trait Drainable: Send + Sync {
    /// Stop accepting new turns for `key` and wait for any in-flight turn to finish.
    async fn drain(&self, key: &ActorKey) -> Result<(), MigrationError>;

    /// Reactivate `key` on `on_silo`, restoring its state from the external state store.
    async fn reactivate(&self, key: &ActorKey, on_silo: &SiloId) -> Result<(), MigrationError>;
}

/// How quickly the idle component of [`activity_score`] decays toward zero. An actor idle for
/// this long scores 0.5 on idleness alone, mirroring a half-life rather than a hard cutoff.
const IDLE_HALF_LIFE: chrono::Duration = chrono::Duration::minutes(1);

/// One migration candidate's live signals, snapshotted at the moment of ranking.
#[derive(Debug, Clone)]
pub struct MigrationCandidate {
    /// The actor this candidate refers to.
    pub key: ActorKey,
    /// Current mailbox queue depth ([`crate::actor::ActorHost::queue_depth`]).
    pub queue_depth: usize,
    /// Turns currently in flight ([`crate::actor::ActorHost::active_call_count`]).
    pub active_calls: usize,
    /// Number of live stream subscriptions bound to this actor.
    pub stream_subscriptions: usize,
    /// When this actor last processed a turn.
    pub last_active: DateTime<Utc>,
}

/// Normalized activity score in `[0, 1]` combining queue depth, in-flight calls, stream
/// subscriptions, and idle time: higher means hotter. A rebalance should migrate candidates
/// scoring low (cold, no active calls) before ones scoring high, minimizing disruption to
/// actors still serving traffic.
pub fn activity_score(
    queue_depth: usize,
    active_calls: usize,
    stream_subscriptions: usize,
    last_active: DateTime<Utc>,
    now: DateTime<Utc>,
) -> f64 {
    let idle = (now - last_active).num_milliseconds().max(0) as f64;
    let half_life = IDLE_HALF_LIFE.num_milliseconds() as f64;
    let idle_component = half_life / (half_life + idle);

    let queue_component = queue_depth as f64 / (queue_depth as f64 + 1.0);
    let calls_component = if active_calls > 0 { 1.0 } else { 0.0 };
    let stream_component = stream_subscriptions as f64 / (stream_subscriptions as f64 + 1.0);

    let score = 0.35 * calls_component + 0.25 * queue_component + 0.15 * stream_component + 0.25 * idle_component;
    score.clamp(0.0, 1.0)
}

/// Order migration candidates cold-first: actors scoring below `0.5` with no in-flight calls
/// migrate before anything else, ordered coldest (lowest score) first.
pub fn select_cold_first(candidates: &[MigrationCandidate], now: DateTime<Utc>) -> Vec<ActorKey> {
    let mut scored: Vec<_> = candidates
        .iter()
        .map(|c| {
            let score = activity_score(c.queue_depth, c.active_calls, c.stream_subscriptions, c.last_active, now);
            (c.key.clone(), score, c.active_calls)
        })
        .filter(|(_, score, active_calls)| *score < 0.5 && *active_calls == 0)
        .collect();
    scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(key, _, _)| key).collect()
}

/// Drives live migrations through drain -> transfer -> reactivate, tracking each attempt's
/// state and enforcing version compatibility before committing to a target silo.
pub struct MigrationCoordinator {
    directory: Arc<ActorDirectory>,
    version_mode: VersionCompatibilityMode,
    records: DashMap<ActorKey, MigrationRecord>,
}

impl MigrationCoordinator {
    /// Create a coordinator backed by `directory`, enforcing `version_mode` compatibility.
    pub fn new(directory: Arc<ActorDirectory>, version_mode: VersionCompatibilityMode) -> Self {
        Self {
            directory,
            version_mode,
            records: DashMap::new(),
        }
    }

    /// Migrate a single actor to `target_silo`.
    ///
    /// Transfer is the directory invalidate/re-insert step: durable actor state already lives
    /// in the external [`crate::state::StateStore`], so there is no bulk data copy here, only
    /// routing-cache bookkeeping around the drain/reactivate pair `drainer` performs.
    pub async fn migrate_actor<D: Drainable>(
        &self,
        key: ActorKey,
        source_silo: SiloId,
        target_silo: SiloId,
        source_version: VersionTriple,
        target_version: VersionTriple,
        drainer: &D,
    ) -> Result<(), MigrationError> {
        if !self.version_mode.is_compatible(source_version, target_version) {
            return Err(MigrationError::VersionIncompatible {
                source: source_version.to_string(),
                target: target_version.to_string(),
            });
        }

        let record = MigrationRecord::begin(key.clone(), source_silo, target_silo.clone());
        self.records.insert(key.clone(), record);

        if let Err(e) = drainer.drain(&key).await {
            self.fail(&key)?;
            return Err(e);
        }

        self.directory.invalidate(&key);

        if let Err(e) = drainer.reactivate(&key, &target_silo).await {
            self.fail(&key)?;
            return Err(e);
        }

        self.directory.insert(key.clone(), target_silo);
        self.complete(&key)
    }

    /// Cancel an in-progress migration; the actor remains on its source silo.
    pub fn cancel(&self, key: &ActorKey) -> Result<(), MigrationError> {
        let mut entry = self
            .records
            .get_mut(key)
            .ok_or_else(|| MigrationError::NotFound(key.clone()))?;
        entry.transition(MigrationState::Cancelled)
    }

    /// Current state of a migration, if one has been started for this actor.
    pub fn state_of(&self, key: &ActorKey) -> Option<MigrationState> {
        self.records.get(key).map(|r| r.state)
    }

    fn complete(&self, key: &ActorKey) -> Result<(), MigrationError> {
        let mut entry = self
            .records
            .get_mut(key)
            .ok_or_else(|| MigrationError::NotFound(key.clone()))?;
        entry.transition(MigrationState::Completed)
    }

    fn fail(&self, key: &ActorKey) -> Result<(), MigrationError> {
        let mut entry = self
            .records
            .get_mut(key)
            .ok_or_else(|| MigrationError::NotFound(key.clone()))?;
        entry.transition(MigrationState::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration as StdDuration;

    struct AlwaysSucceeds;

    #[async_trait]
    impl Drainable for AlwaysSucceeds {
        async fn drain(&self, _key: &ActorKey) -> Result<(), MigrationError> {
            Ok(())
        }

        async fn reactivate(&self, _key: &ActorKey, _on_silo: &SiloId) -> Result<(), MigrationError> {
            Ok(())
        }
    }

    struct DrainFails;

    #[async_trait]
    impl Drainable for DrainFails {
        async fn drain(&self, key: &ActorKey) -> Result<(), MigrationError> {
            Err(MigrationError::DrainFailed(key.clone(), "actor wedged".to_string()))
        }

        async fn reactivate(&self, _key: &ActorKey, _on_silo: &SiloId) -> Result<(), MigrationError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_successful_migration_updates_directory() {
        let directory = Arc::new(ActorDirectory::new(StdDuration::from_secs(60)));
        let key = ActorKey::new("cart", "user-1");
        let source = SiloId::new("a");
        let target = SiloId::new("b");
        directory.insert(key.clone(), source.clone());

        let coordinator = MigrationCoordinator::new(Arc::clone(&directory), VersionCompatibilityMode::Minor);
        coordinator
            .migrate_actor(
                key.clone(),
                source,
                target.clone(),
                VersionTriple::new(1, 0, 0),
                VersionTriple::new(1, 4, 2),
                &AlwaysSucceeds,
            )
            .await
            .unwrap();

        assert_eq!(coordinator.state_of(&key), Some(MigrationState::Completed));
        assert_eq!(directory.lookup(&key), Some(target));
    }

    #[tokio::test]
    async fn test_drain_failure_marks_migration_failed() {
        let directory = Arc::new(ActorDirectory::new(StdDuration::from_secs(60)));
        let key = ActorKey::new("cart", "user-1");
        let coordinator = MigrationCoordinator::new(directory, VersionCompatibilityMode::Minor);

        let result = coordinator
            .migrate_actor(
                key.clone(),
                SiloId::new("a"),
                SiloId::new("b"),
                VersionTriple::new(1, 0, 0),
                VersionTriple::new(1, 0, 0),
                &DrainFails,
            )
            .await;

        assert!(result.is_err());
        assert_eq!(coordinator.state_of(&key), Some(MigrationState::Failed));
    }

    #[tokio::test]
    async fn test_incompatible_versions_rejected_before_draining() {
        let directory = Arc::new(ActorDirectory::new(StdDuration::from_secs(60)));
        let key = ActorKey::new("cart", "user-1");
        let coordinator = MigrationCoordinator::new(directory, VersionCompatibilityMode::Strict);

        let result = coordinator
            .migrate_actor(
                key.clone(),
                SiloId::new("a"),
                SiloId::new("b"),
                VersionTriple::new(1, 0, 0),
                VersionTriple::new(2, 0, 0),
                &AlwaysSucceeds,
            )
            .await;

        assert!(matches!(result, Err(MigrationError::VersionIncompatible { .. })));
        assert_eq!(coordinator.state_of(&key), None);
    }

    fn idle_candidate(key: ActorKey, last_active: DateTime<Utc>) -> MigrationCandidate {
        MigrationCandidate {
            key,
            queue_depth: 0,
            active_calls: 0,
            stream_subscriptions: 0,
            last_active,
        }
    }

    #[test]
    fn test_select_cold_first_orders_longest_idle_first() {
        let now = Utc::now();
        let hot = ActorKey::new("cart", "hot");
        let cold = ActorKey::new("cart", "cold");
        let candidates = vec![
            idle_candidate(hot.clone(), now - chrono::Duration::seconds(1)),
            idle_candidate(cold.clone(), now - chrono::Duration::hours(2)),
        ];

        let ordered = select_cold_first(&candidates, now);
        assert_eq!(ordered, vec![cold, hot]);
    }

    #[test]
    fn test_select_cold_first_excludes_actors_with_active_calls() {
        let now = Utc::now();
        let busy = ActorKey::new("cart", "busy");
        let candidates = vec![MigrationCandidate {
            key: busy,
            queue_depth: 0,
            active_calls: 1,
            stream_subscriptions: 0,
            last_active: now - chrono::Duration::hours(3),
        }];

        assert!(select_cold_first(&candidates, now).is_empty());
    }

    #[test]
    fn test_activity_score_in_unit_range() {
        let now = Utc::now();
        let hot = activity_score(50, 3, 10, now, now);
        let cold = activity_score(0, 0, 0, now - chrono::Duration::hours(6), now);
        assert!((0.0..=1.0).contains(&hot));
        assert!((0.0..=1.0).contains(&cold));
        assert!(hot > cold);
    }

    #[test]
    fn test_activity_score_active_calls_keep_score_at_or_above_threshold() {
        let now = Utc::now();
        let score = activity_score(0, 1, 0, now - chrono::Duration::hours(6), now);
        assert!(score >= 0.35);
    }
}
