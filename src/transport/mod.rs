//! Cross-silo transport: the wire boundary between physical silo processes.
//!
//! [`Transport`] moves [`crate::message::Envelope`]s between silos; [`BypassTransport`] wraps
//! any `Transport` so that calls addressed to the local silo skip the wire and go straight to
//! a [`LocalDelivery`] handler instead.

pub mod bypass;
pub mod error;
pub mod in_memory;
pub mod traits;

pub use bypass::BypassTransport;
pub use error::TransportError;
pub use in_memory::InProcessTransport;
pub use traits::{LocalDelivery, Transport};
