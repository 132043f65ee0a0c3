//! Stream broker error types.
//!
//! This module defines the errors that can occur when subscribing to or
//! publishing on a [`crate::broker::StreamBroker`] stream.

// Layer 2: Third-party crate imports
use thiserror::Error;

/// Errors produced by the stream broker's pub/sub machinery.
///
/// # Example
///
/// ```rust
/// use meshforge::broker::BrokerError;
///
/// let error = BrokerError::Lagged(42);
/// assert!(error.to_string().contains("lagged"));
/// ```
#[derive(Debug, Error)]
pub enum BrokerError {
    /// A stream subscription fell behind and missed `n` published envelopes.
    #[error("stream subscription lagged, missed {0} envelopes")]
    Lagged(u64),

    /// The stream broker was dropped; no further envelopes will be published.
    #[error("stream closed")]
    StreamClosed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_lagged_error() {
        let error = BrokerError::Lagged(7);
        let error_string = error.to_string();
        assert!(error_string.contains("lagged"));
        assert!(error_string.contains('7'));
    }

    #[test]
    fn test_stream_closed_error() {
        let error = BrokerError::StreamClosed;
        assert_eq!(error.to_string(), "stream closed");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BrokerError>();
    }

    #[test]
    fn test_error_is_std_error() {
        let error = BrokerError::StreamClosed;
        let _: &dyn StdError = &error;
    }

    #[test]
    fn test_error_debug_impl() {
        let error = BrokerError::Lagged(3);
        let debug_string = format!("{error:?}");
        assert!(debug_string.contains("Lagged"));
    }
}
