//! Virtual actors: business logic, lifecycle, and the one type-erasure boundary in the crate.
//!
//! # Components
//!
//! - [`Actor`] - trait actor implementations provide, dispatched by method name
//! - [`ActorContext`] - per-turn identity (actor key, local silo, activation time)
//! - [`ActorHost`] - type-erased actor-type registry and activation table
//! - [`ActorLifecycle`] / [`ActorState`] - activation state machine for supervision
//! - [`ErrorAction`] - supervision decision returned from `Actor::on_error`
//!
//! # Module Organization (§4.3)
//!
//! This mod.rs file contains only module declarations and re-exports; implementation lives
//! in `traits.rs`, `context.rs`, `lifecycle.rs`, and `host.rs`.

pub mod context;
pub mod host;
pub mod lifecycle;
pub mod traits;

pub use context::ActorContext;
pub use host::{ActorFactory, ActorHost};
pub use lifecycle::{ActorLifecycle, ActorState};
pub use traits::{Actor, ActorError, ErrorAction};
