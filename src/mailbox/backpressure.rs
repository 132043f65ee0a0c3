//! Backpressure strategies for handling full mailboxes.
//!
//! This module provides backpressure handling strategies for bounded mailboxes,
//! allowing fine-grained control over message delivery behavior when mailboxes
//! reach capacity.

// Layer 1: Standard library imports
use std::fmt;
use std::time::Duration;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::message::MessagePriority;

/// Backpressure modes for handling full mailboxes.
///
/// When a bounded mailbox reaches capacity, the configured mode determines how the
/// mailbox handles additional incoming messages.
///
/// # Mode Selection
///
/// - **None**: No limit is enforced at all; the mailbox behaves as unbounded even
///   though a capacity was configured (useful for testing a capacity without
///   enforcing it yet).
/// - **Block**: Critical messages that must be delivered (may cause sender delays).
/// - **DropOldest**: Evict the head of the queue to make room for the new message,
///   routing the evicted message to the dead-letter queue.
/// - **DropNewest**: Silently discard the incoming message, leaving the queue as-is.
/// - **Throttle(n, window)**: Admit at most `n` messages per rolling `window`,
///   rejecting the rest with [`super::traits::MailboxError::Full`].
///
/// # Example
///
/// ```
/// use meshforge::mailbox::BackpressureMode;
/// use meshforge::message::MessagePriority;
///
/// let mode = BackpressureMode::for_priority(MessagePriority::Critical);
/// assert_eq!(mode, BackpressureMode::Block);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BackpressureMode {
    /// Enforce no capacity limit; sends never fail due to fullness.
    None,

    /// Block sender until space becomes available (async wait).
    Block,

    /// Evict the oldest queued message to make room, sending it to the DLQ.
    DropOldest,

    /// Drop the incoming message when the mailbox is full.
    #[default]
    DropNewest,

    /// Admit at most `n` messages per rolling window of duration `w`, rejecting
    /// the rest.
    Throttle {
        /// Maximum admitted messages per window.
        n: u32,
        /// Window duration.
        w: Duration,
    },
}

impl fmt::Display for BackpressureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Block => write!(f, "Block"),
            Self::DropOldest => write!(f, "DropOldest"),
            Self::DropNewest => write!(f, "DropNewest"),
            Self::Throttle { n, w } => write!(f, "Throttle({n}/{w:?})"),
        }
    }
}

impl BackpressureMode {
    /// Select an appropriate backpressure mode based on message priority.
    ///
    /// # Mode Mapping
    ///
    /// - Critical → Block (must be delivered)
    /// - High → Block (important messages)
    /// - Normal → DropOldest (prefer fresh work over stale backlog)
    /// - Low → DropNewest (can be safely discarded)
    ///
    /// # Example
    ///
    /// ```
    /// use meshforge::mailbox::BackpressureMode;
    /// use meshforge::message::MessagePriority;
    ///
    /// let mode = BackpressureMode::for_priority(MessagePriority::Critical);
    /// assert_eq!(mode, BackpressureMode::Block);
    ///
    /// let mode = BackpressureMode::for_priority(MessagePriority::Low);
    /// assert_eq!(mode, BackpressureMode::DropNewest);
    /// ```
    pub fn for_priority(priority: MessagePriority) -> Self {
        match priority {
            MessagePriority::Critical => Self::Block,
            MessagePriority::High => Self::Block,
            MessagePriority::Normal => Self::DropOldest,
            MessagePriority::Low => Self::DropNewest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backpressure_mode_default() {
        assert_eq!(BackpressureMode::default(), BackpressureMode::DropNewest);
    }

    #[test]
    fn test_backpressure_mode_display() {
        assert_eq!(BackpressureMode::Block.to_string(), "Block");
        assert_eq!(BackpressureMode::DropOldest.to_string(), "DropOldest");
        assert_eq!(BackpressureMode::DropNewest.to_string(), "DropNewest");
        assert_eq!(BackpressureMode::None.to_string(), "None");
    }

    #[test]
    fn test_mode_for_priority_critical() {
        assert_eq!(
            BackpressureMode::for_priority(MessagePriority::Critical),
            BackpressureMode::Block
        );
    }

    #[test]
    fn test_mode_for_priority_high() {
        assert_eq!(
            BackpressureMode::for_priority(MessagePriority::High),
            BackpressureMode::Block
        );
    }

    #[test]
    fn test_mode_for_priority_normal() {
        assert_eq!(
            BackpressureMode::for_priority(MessagePriority::Normal),
            BackpressureMode::DropOldest
        );
    }

    #[test]
    fn test_mode_for_priority_low() {
        assert_eq!(
            BackpressureMode::for_priority(MessagePriority::Low),
            BackpressureMode::DropNewest
        );
    }

    #[test]
    fn test_throttle_display() {
        let mode = BackpressureMode::Throttle {
            n: 10,
            w: Duration::from_secs(1),
        };
        assert!(mode.to_string().starts_with("Throttle(10/"));
    }

    #[test]
    fn test_mode_equality() {
        assert_eq!(BackpressureMode::Block, BackpressureMode::Block);
        assert_ne!(BackpressureMode::Block, BackpressureMode::DropNewest);
    }
}
