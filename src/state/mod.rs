//! Durable actor state with optimistic concurrency control.

pub mod error;
pub mod store;

pub use error::StateError;
pub use store::{InMemoryStateStore, StateStore, VersionedRecord};
