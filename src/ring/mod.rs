//! Consistent hash ring: the authoritative placement oracle for actors that have not yet
//! been activated anywhere.
//!
//! The ring maps an [`ActorKey`](crate::util::ActorKey) to the [`SiloId`] that owns it, using
//! virtual nodes for even distribution and CRC32 hashing for a stable, cluster-wide hash
//! function (every silo computes the same placement for the same key without coordination).
//! Writes (silo join/leave) build a fresh ring and atomically swap it in; reads never take a
//! lock, the same snapshot-swap pattern used elsewhere in the crate for hot read paths.

pub mod node;

pub use node::{HashRing, RingSnapshot, Tier, VirtualNode};
