//! Actor directory: a non-authoritative cache of where an already-activated actor lives.
//!
//! The directory is consulted before the hash ring (spec §4.2): if a hit is found and not
//! expired, it is trusted as the actor's current silo; on a miss or a stale entry, the caller
//! falls back to [`crate::ring::HashRing::route`]. Invalidation on migration or ring rebuild
//! keeps entries from outliving their accuracy for longer than the configured TTL.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use dashmap::DashMap;

// Layer 3: Internal module imports
use crate::util::{ActorKey, SiloId};

#[derive(Clone)]
struct Entry {
    silo_id: SiloId,
    inserted_at: DateTime<Utc>,
}

/// TTL-expiring cache from [`ActorKey`] to the silo currently hosting it.
///
/// Uses the same DashMap-backed registry shape (insert/remove/lookup) as the crate's other
/// routing tables, extended with a per-entry age check instead of an authoritative
/// always-valid lookup.
pub struct ActorDirectory {
    entries: DashMap<ActorKey, Entry>,
    ttl: Duration,
}

impl ActorDirectory {
    /// Create a directory whose entries are considered stale after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Record (or refresh) that `key` is currently hosted on `silo_id`.
    pub fn insert(&self, key: ActorKey, silo_id: SiloId) {
        self.entries.insert(
            key,
            Entry {
                silo_id,
                inserted_at: Utc::now(), // §3.2
            },
        );
    }

    /// Look up the cached silo for `key`, returning `None` if absent or past its TTL.
    pub fn lookup(&self, key: &ActorKey) -> Option<SiloId> {
        let entry = self.entries.get(key)?;
        let age = Utc::now().signed_duration_since(entry.inserted_at);
        if age.to_std().unwrap_or(Duration::MAX) > self.ttl {
            drop(entry);
            self.entries.remove(key);
            return None;
        }
        Some(entry.silo_id.clone())
    }

    /// Invalidate a single entry, e.g. after a migration completes.
    pub fn invalidate(&self, key: &ActorKey) {
        self.entries.remove(key);
    }

    /// Invalidate every entry pointing at `silo_id`, e.g. after it's evicted from the cluster.
    pub fn invalidate_silo(&self, silo_id: &SiloId) {
        self.entries.retain(|_, entry| &entry.silo_id != silo_id);
    }

    /// Number of cached entries, including ones that have not yet been lazily expired.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the directory currently holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ActorKey {
        ActorKey::new("cart", "user-1")
    }

    #[test]
    fn test_insert_and_lookup() {
        let dir = ActorDirectory::new(Duration::from_secs(60));
        dir.insert(key(), SiloId::new("silo-a"));
        assert_eq!(dir.lookup(&key()), Some(SiloId::new("silo-a")));
    }

    #[test]
    fn test_miss_returns_none() {
        let dir = ActorDirectory::new(Duration::from_secs(60));
        assert_eq!(dir.lookup(&key()), None);
    }

    #[test]
    fn test_expired_entry_is_evicted_on_lookup() {
        let dir = ActorDirectory::new(Duration::from_secs(60));
        dir.entries.insert(
            key(),
            Entry {
                silo_id: SiloId::new("silo-a"),
                inserted_at: Utc::now() - chrono::Duration::seconds(120),
            },
        );
        assert_eq!(dir.lookup(&key()), None);
        assert!(dir.is_empty());
    }

    #[test]
    fn test_invalidate_removes_entry() {
        let dir = ActorDirectory::new(Duration::from_secs(60));
        dir.insert(key(), SiloId::new("silo-a"));
        dir.invalidate(&key());
        assert_eq!(dir.lookup(&key()), None);
    }

    #[test]
    fn test_invalidate_silo_removes_all_its_entries() {
        let dir = ActorDirectory::new(Duration::from_secs(60));
        dir.insert(ActorKey::new("cart", "1"), SiloId::new("silo-a"));
        dir.insert(ActorKey::new("cart", "2"), SiloId::new("silo-b"));

        dir.invalidate_silo(&SiloId::new("silo-a"));

        assert_eq!(dir.lookup(&ActorKey::new("cart", "1")), None);
        assert_eq!(
            dir.lookup(&ActorKey::new("cart", "2")),
            Some(SiloId::new("silo-b"))
        );
    }
}
