//! Routing: deciding which silo should receive an envelope, and retrying sanely when that
//! guess turns out to be wrong.

pub mod engine;
pub mod error;

pub use engine::{RouteDecision, Router, RouterConfig};
pub use error::RouterError;
