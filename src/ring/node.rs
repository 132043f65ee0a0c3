// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::util::{ActorKey, SiloId};

/// Default number of virtual nodes placed on the ring per physical silo.
pub const DEFAULT_VIRTUAL_NODES_PER_SILO: u32 = 100;

/// Optional hierarchical placement tier for a silo (e.g. cloud region/zone).
///
/// Carried alongside each [`VirtualNode`] so a router can prefer same-region routing for
/// latency-sensitive calls without abandoning the ring's deterministic placement; the ring
/// itself never reads `Tier` when computing ownership, it's informational for callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tier {
    /// Coarse-grained region, e.g. `"us-east"`.
    pub region: String,
    /// Fine-grained zone within the region, e.g. `"us-east-1a"`.
    pub zone: String,
}

/// A single point on the hash ring, owned by one physical silo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualNode {
    /// CRC32 hash of this virtual node's synthetic key (`"{silo_id}#{vnode_index}"`).
    pub hash: u32,
    /// The physical silo this point belongs to.
    pub silo_id: SiloId,
    /// The silo's tier, if the cluster is configured with hierarchical placement.
    pub tier: Option<Tier>,
}

/// An immutable point-in-time view of the ring, sorted by hash for binary search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RingSnapshot {
    nodes: Vec<VirtualNode>,
}

impl RingSnapshot {
    /// Build a snapshot from physical silos, each expanded into `vnodes_per_silo` virtual
    /// points, sorted by hash.
    pub fn build<'a>(
        silos: impl IntoIterator<Item = (&'a SiloId, Option<&'a Tier>)>,
        vnodes_per_silo: u32,
    ) -> Self {
        let mut nodes = Vec::new();
        for (silo_id, tier) in silos {
            for i in 0..vnodes_per_silo {
                let key = format!("{silo_id}#{i}");
                nodes.push(VirtualNode {
                    hash: crc32fast::hash(key.as_bytes()),
                    silo_id: silo_id.clone(),
                    tier: tier.cloned(),
                });
            }
        }
        nodes.sort_by_key(|n| n.hash);
        Self { nodes }
    }

    /// The number of virtual nodes in this snapshot.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether this snapshot has no virtual nodes at all (empty cluster view).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find the owning virtual node for a given routing key hash, wrapping around the ring.
    pub fn owner_for_hash(&self, key_hash: u32) -> Option<&VirtualNode> {
        if self.nodes.is_empty() {
            return None;
        }
        match self.nodes.binary_search_by_key(&key_hash, |n| n.hash) {
            Ok(idx) => Some(&self.nodes[idx]),
            Err(idx) if idx == self.nodes.len() => Some(&self.nodes[0]),
            Err(idx) => Some(&self.nodes[idx]),
        }
    }

    /// The distinct silos with any presence on the ring, in ring order, deduplicated.
    pub fn distinct_silos(&self) -> Vec<SiloId> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for node in &self.nodes {
            if seen.insert(node.silo_id.clone()) {
                out.push(node.silo_id.clone());
            }
        }
        out
    }
}

/// Hash of an [`ActorKey`]'s canonical string form (spec §4.1: `"{actor_type}:{actor_id}"`).
pub fn hash_key(key: &ActorKey) -> u32 {
    crc32fast::hash(key.to_string().as_bytes())
}

/// Lock-free-read consistent hash ring.
///
/// Rebuilds replace the whole snapshot and swap it in under a brief write lock; routing reads
/// only clone the `Arc`, so concurrent lookups never block each other or a concurrent rebuild.
///
/// # Example
/// ```rust
/// use meshforge::ring::HashRing;
/// use meshforge::util::{ActorKey, SiloId};
///
/// let ring = HashRing::new(10);
/// let silos = vec![SiloId::new("silo-a"), SiloId::new("silo-b")];
/// ring.rebuild(silos.iter().map(|s| (s, None)));
///
/// let owner = ring.route(&ActorKey::new("cart", "user-1"));
/// assert!(owner.is_some());
/// ```
pub struct HashRing {
    snapshot: RwLock<Arc<RingSnapshot>>,
    vnodes_per_silo: u32,
}

impl HashRing {
    /// Create an empty ring with the given number of virtual nodes per silo.
    pub fn new(vnodes_per_silo: u32) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(RingSnapshot::default())),
            vnodes_per_silo,
        }
    }

    /// Create a ring using the spec's default of 100 virtual nodes per silo.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_VIRTUAL_NODES_PER_SILO)
    }

    /// Rebuild the ring from a fresh membership view and atomically swap it in.
    pub fn rebuild<'a>(&self, silos: impl IntoIterator<Item = (&'a SiloId, Option<&'a Tier>)>) {
        let snapshot = Arc::new(RingSnapshot::build(silos, self.vnodes_per_silo));
        *self.snapshot.write() = snapshot;
    }

    /// Route an actor key to its owning silo, or `None` if the ring has no members.
    pub fn route(&self, key: &ActorKey) -> Option<SiloId> {
        let snapshot = self.snapshot();
        snapshot
            .owner_for_hash(hash_key(key))
            .map(|n| n.silo_id.clone())
    }

    /// Obtain a cheap clone of the current ring snapshot for inspection or diagnostics.
    pub fn snapshot(&self) -> Arc<RingSnapshot> {
        Arc::clone(&self.snapshot.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ring_routes_nothing() {
        let ring = HashRing::new(10);
        let key = ActorKey::new("cart", "user-1");
        assert!(ring.route(&key).is_none());
    }

    #[test]
    fn test_routes_to_a_member() {
        let ring = HashRing::new(10);
        let silos = vec![SiloId::new("a"), SiloId::new("b"), SiloId::new("c")];
        ring.rebuild(silos.iter().map(|s| (s, None)));

        let owner = ring.route(&ActorKey::new("cart", "user-1")).unwrap();
        assert!(silos.contains(&owner));
    }

    #[test]
    fn test_same_key_routes_deterministically() {
        let ring = HashRing::new(20);
        let silos = vec![SiloId::new("a"), SiloId::new("b")];
        ring.rebuild(silos.iter().map(|s| (s, None)));

        let key = ActorKey::new("cart", "user-42");
        let first = ring.route(&key);
        let second = ring.route(&key);
        assert_eq!(first, second);
    }

    #[test]
    fn test_rebuild_preserves_most_keys_with_one_new_silo() {
        // Classic consistent-hashing property: adding a silo should not move most keys.
        let ring = HashRing::new(100);
        let initial = vec![SiloId::new("a"), SiloId::new("b"), SiloId::new("c")];
        ring.rebuild(initial.iter().map(|s| (s, None)));

        let keys: Vec<ActorKey> = (0..200)
            .map(|i| ActorKey::new("cart", format!("user-{i}")))
            .collect();
        let before: Vec<_> = keys.iter().map(|k| ring.route(k)).collect();

        let mut expanded = initial.clone();
        expanded.push(SiloId::new("d"));
        ring.rebuild(expanded.iter().map(|s| (s, None)));

        let after: Vec<_> = keys.iter().map(|k| ring.route(k)).collect();
        let moved = before.iter().zip(after.iter()).filter(|(a, b)| a != b).count();

        // With 4 silos, roughly 1/4 of keys should move; allow generous slack.
        assert!(moved < keys.len() / 2, "too many keys moved: {moved}");
    }

    #[test]
    fn test_distinct_silos_deduplicates_virtual_nodes() {
        let silos = vec![SiloId::new("a"), SiloId::new("b")];
        let snapshot = RingSnapshot::build(silos.iter().map(|s| (s, None)), 10);
        let distinct = snapshot.distinct_silos();
        assert_eq!(distinct.len(), 2);
    }

    #[test]
    fn test_hash_key_is_stable() {
        let key = ActorKey::new("cart", "user-1");
        assert_eq!(hash_key(&key), hash_key(&key));
    }
}
