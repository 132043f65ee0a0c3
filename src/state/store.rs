// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use dashmap::DashMap;

// Layer 3: Internal module imports
use super::error::StateError;
use crate::util::StateKey;

/// A stored state blob along with its optimistic-concurrency version.
#[derive(Debug, Clone)]
pub struct VersionedRecord {
    /// Opaque, codec-encoded state payload.
    pub payload: Bytes,
    /// Monotonically increasing version; bumped on every successful save.
    pub version: u64,
    /// When this version was written.
    pub updated_at: DateTime<Utc>,
}

/// External contract for durable actor state, with optimistic concurrency control.
///
/// Single async trait with an associated `Error`, `Send + Sync`, to stay consistent with the
/// rest of the crate's collaborator contracts: a real deployment implements this against its
/// own database, [`InMemoryStateStore`] is the reference implementation used by tests.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the current record for `key`, if any exists.
    async fn load_with_version(&self, key: &StateKey) -> Result<Option<VersionedRecord>, StateError>;

    /// Save `payload` for `key`, only if the stored version equals `expected_version`
    /// (`0` means "must not already exist"). Returns the new version on success.
    async fn save_with_version(
        &self,
        key: &StateKey,
        payload: Bytes,
        expected_version: u64,
    ) -> Result<u64, StateError>;

    /// Delete the record for `key`, if one exists.
    async fn delete(&self, key: &StateKey) -> Result<(), StateError>;
}

/// In-memory reference [`StateStore`], backed by a [`DashMap`].
#[derive(Default)]
pub struct InMemoryStateStore {
    records: DashMap<StateKey, VersionedRecord>,
}

impl InMemoryStateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn load_with_version(&self, key: &StateKey) -> Result<Option<VersionedRecord>, StateError> {
        Ok(self.records.get(key).map(|r| r.clone()))
    }

    async fn save_with_version(
        &self,
        key: &StateKey,
        payload: Bytes,
        expected_version: u64,
    ) -> Result<u64, StateError> {
        let actual_version = self.records.get(key).map(|r| r.version).unwrap_or(0);
        if actual_version != expected_version {
            return Err(StateError::Concurrency {
                key: key.clone(),
                expected: expected_version,
                actual: actual_version,
            });
        }

        let new_version = actual_version + 1;
        self.records.insert(
            key.clone(),
            VersionedRecord {
                payload,
                version: new_version,
                updated_at: Utc::now(), // §3.2
            },
        );
        Ok(new_version)
    }

    async fn delete(&self, key: &StateKey) -> Result<(), StateError> {
        self.records
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StateError::NotFound(key.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> StateKey {
        StateKey::new(crate::util::ActorKey::new("cart", "user-1"), "cart")
    }

    #[tokio::test]
    async fn test_same_actor_different_state_names_are_independent() {
        let store = InMemoryStateStore::new();
        let actor = crate::util::ActorKey::new("cart", "user-1");
        let cart_key = StateKey::new(actor.clone(), "cart");
        let prefs_key = StateKey::new(actor, "preferences");

        store
            .save_with_version(&cart_key, Bytes::from_static(b"cart-v1"), 0)
            .await
            .unwrap();

        assert!(store.load_with_version(&prefs_key).await.unwrap().is_none());
        let prefs_version = store
            .save_with_version(&prefs_key, Bytes::from_static(b"prefs-v1"), 0)
            .await
            .unwrap();
        assert_eq!(prefs_version, 1);
        assert_eq!(
            store.load_with_version(&cart_key).await.unwrap().unwrap().payload,
            Bytes::from_static(b"cart-v1")
        );
    }

    #[tokio::test]
    async fn test_load_missing_returns_none() {
        let store = InMemoryStateStore::new();
        assert!(store.load_with_version(&key()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_new_record_requires_expected_zero() {
        let store = InMemoryStateStore::new();
        let version = store
            .save_with_version(&key(), Bytes::from_static(b"v1"), 0)
            .await
            .unwrap();
        assert_eq!(version, 1);
    }

    #[tokio::test]
    async fn test_save_with_stale_version_conflicts() {
        let store = InMemoryStateStore::new();
        store
            .save_with_version(&key(), Bytes::from_static(b"v1"), 0)
            .await
            .unwrap();

        let result = store
            .save_with_version(&key(), Bytes::from_static(b"v2"), 0)
            .await;
        assert!(matches!(
            result,
            Err(StateError::Concurrency {
                expected: 0,
                actual: 1,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_save_with_correct_version_succeeds() {
        let store = InMemoryStateStore::new();
        store
            .save_with_version(&key(), Bytes::from_static(b"v1"), 0)
            .await
            .unwrap();

        let version = store
            .save_with_version(&key(), Bytes::from_static(b"v2"), 1)
            .await
            .unwrap();
        assert_eq!(version, 2);
    }

    #[tokio::test]
    async fn test_delete_missing_errors() {
        let store = InMemoryStateStore::new();
        let result = store.delete(&key()).await;
        assert!(matches!(result, Err(StateError::NotFound(_))));
    }
}
