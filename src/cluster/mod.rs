//! Cluster membership: who is in the cluster, how freshly we've heard from them, and the
//! external contract a deployment plugs in to persist that view.
//!
//! Membership changes (join/leave/suspect) feed [`crate::ring::HashRing::rebuild`]; this module
//! owns the liveness bookkeeping, the hash ring owns placement.

pub mod error;
pub mod store;

pub use error::ClusterError;
pub use store::{ClusterEvent, ClusterStore, InMemoryClusterStore, SiloDescriptor, SiloStatus};
