//! Durable, at-least-once reminder service.
//!
//! Reminders are registered against a single actor and delivered as ordinary
//! [`crate::message::Envelope`]s flagged [`crate::message::EnvelopeFlags::is_reminder`].
//! A periodic scan (see [`scan::spawn_reminder_scanner`]) finds due reminders, re-checks
//! ownership against the current hash ring so a reminder whose actor migrated away is left
//! for its new owner to pick up, and delivers the rest through a [`scan::ReminderSink`].

pub mod error;
pub mod scan;
pub mod table;

pub use error::ReminderError;
pub use scan::{spawn_reminder_scanner, ReminderSink};
pub use table::{InMemoryReminderTable, Reminder, ReminderTable};
