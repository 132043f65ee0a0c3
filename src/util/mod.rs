//! Utility types and helpers shared across the runtime.

pub mod ids;
pub mod serde_helpers;

pub use ids::{
    ActorAddress, ActorId, ActorInstanceId, ActorKey, ActorType, MessageId, SiloId, StateKey,
};
pub use serde_helpers::duration_serde;
