//! Message system: the wire [`Envelope`], the stable [`ErrorKind`] taxonomy, and the
//! generic [`Message`] trait used for in-process control messages.
//!
//! [`Envelope`] is the single unit that crosses every boundary in this crate — mailbox,
//! dead-letter queue, transport, reminder delivery — so component modules depend on it
//! directly rather than being generic over a message type, unlike the rest of the crate's
//! traits which stay generic per ยง6.2.

pub mod envelope;
pub mod error_kind;
pub mod traits;

pub use envelope::{Envelope, EnvelopeFlags};
pub use error_kind::ErrorKind;
pub use traits::{Message, MessagePriority};
