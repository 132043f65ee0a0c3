//! Dead-letter queue: where envelopes land when delivery fails outright, with a retry policy
//! and a replay API for operators.

pub mod backoff;
pub mod error;
pub mod store;

pub use backoff::RetryBackoff;
pub use error::DlqError;
pub use store::{DeadLetter, DlqConfig, DlqStore, FailureReason};
