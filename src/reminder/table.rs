// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use super::error::ReminderError;
use crate::util::ActorKey;

/// A durable, named reminder registered against a single actor.
///
/// One-shot reminders have `period: None` and are removed once delivered; recurring
/// reminders carry a `period` and are rescheduled to `now + period` on each delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    /// The actor this reminder wakes up.
    pub key: ActorKey,
    /// Name, unique per actor, so a caller can register/cancel idempotently.
    pub name: String,
    /// The next time this reminder is due for delivery.
    pub due_at: DateTime<Utc>,
    /// Recurrence interval; `None` means "deliver once, then drop".
    pub period: Option<Duration>,
    /// Opaque payload delivered as the reminder envelope's body.
    pub payload: Bytes,
}

impl Reminder {
    fn reschedule(&mut self) -> bool {
        match self.period {
            Some(period) => {
                self.due_at = Utc::now() // §3.2
                    + chrono::Duration::from_std(period).unwrap_or_default();
                true
            }
            None => false,
        }
    }
}

/// External contract for durable reminder storage.
///
/// Shaped like [`crate::state::StateStore`] and [`crate::dlq::DlqStore`]: a real deployment
/// backs this with durable storage so reminders survive a silo crash, [`InMemoryReminderTable`]
/// is the reference implementation used by tests and single-process deployments.
#[async_trait]
pub trait ReminderTable: Send + Sync {
    /// Register (or overwrite, if `name` already exists for `key`) a reminder.
    async fn register(&self, reminder: Reminder) -> Result<(), ReminderError>;

    /// Cancel a previously registered reminder.
    async fn cancel(&self, key: &ActorKey, name: &str) -> Result<(), ReminderError>;

    /// All reminders due at or before `now`. Does not mutate their schedule.
    async fn due_before(&self, now: DateTime<Utc>) -> Vec<Reminder>;

    /// Record a successful delivery: recurring reminders are rescheduled, one-shot
    /// reminders are removed.
    async fn mark_delivered(&self, key: &ActorKey, name: &str) -> Result<(), ReminderError>;

    /// All reminders currently registered for a given actor.
    async fn by_actor(&self, key: &ActorKey) -> Vec<Reminder>;
}

/// In-memory reference [`ReminderTable`], backed by a [`DashMap`] keyed on `(actor_key, name)`.
#[derive(Default)]
pub struct InMemoryReminderTable {
    reminders: DashMap<(ActorKey, String), Reminder>,
}

impl InMemoryReminderTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReminderTable for InMemoryReminderTable {
    async fn register(&self, reminder: Reminder) -> Result<(), ReminderError> {
        let id = (reminder.key.clone(), reminder.name.clone());
        self.reminders.insert(id, reminder);
        Ok(())
    }

    async fn cancel(&self, key: &ActorKey, name: &str) -> Result<(), ReminderError> {
        self.reminders
            .remove(&(key.clone(), name.to_string()))
            .map(|_| ())
            .ok_or_else(|| ReminderError::NotFound {
                key: key.clone(),
                name: name.to_string(),
            })
    }

    async fn due_before(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        self.reminders
            .iter()
            .filter(|entry| entry.value().due_at <= now)
            .map(|entry| entry.value().clone())
            .collect()
    }

    async fn mark_delivered(&self, key: &ActorKey, name: &str) -> Result<(), ReminderError> {
        let id = (key.clone(), name.to_string());
        let mut entry = self
            .reminders
            .get_mut(&id)
            .ok_or_else(|| ReminderError::NotFound {
                key: key.clone(),
                name: name.to_string(),
            })?;

        if !entry.reschedule() {
            drop(entry);
            self.reminders.remove(&id);
        }
        Ok(())
    }

    async fn by_actor(&self, key: &ActorKey) -> Vec<Reminder> {
        self.reminders
            .iter()
            .filter(|entry| &entry.key().0 == key)
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_shot(key: ActorKey, due_at: DateTime<Utc>) -> Reminder {
        Reminder {
            key,
            name: "expire".to_string(),
            due_at,
            period: None,
            payload: Bytes::new(),
        }
    }

    #[tokio::test]
    async fn test_register_and_due_before() {
        let table = InMemoryReminderTable::new();
        let key = ActorKey::new("cart", "user-1");
        table
            .register(one_shot(key.clone(), Utc::now() - chrono::Duration::seconds(1)))
            .await
            .unwrap();

        let due = table.due_before(Utc::now()).await;
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].key, key);
    }

    #[tokio::test]
    async fn test_not_yet_due_is_excluded() {
        let table = InMemoryReminderTable::new();
        let key = ActorKey::new("cart", "user-1");
        table
            .register(one_shot(key, Utc::now() + chrono::Duration::hours(1)))
            .await
            .unwrap();

        assert!(table.due_before(Utc::now()).await.is_empty());
    }

    #[tokio::test]
    async fn test_mark_delivered_removes_one_shot() {
        let table = InMemoryReminderTable::new();
        let key = ActorKey::new("cart", "user-1");
        table
            .register(one_shot(key.clone(), Utc::now() - chrono::Duration::seconds(1)))
            .await
            .unwrap();

        table.mark_delivered(&key, "expire").await.unwrap();
        assert!(table.due_before(Utc::now()).await.is_empty());
    }

    #[tokio::test]
    async fn test_mark_delivered_reschedules_recurring() {
        let table = InMemoryReminderTable::new();
        let key = ActorKey::new("cart", "user-1");
        let reminder = Reminder {
            period: Some(Duration::from_secs(3600)),
            ..one_shot(key.clone(), Utc::now() - chrono::Duration::seconds(1))
        };
        table.register(reminder).await.unwrap();

        table.mark_delivered(&key, "expire").await.unwrap();
        assert!(table.due_before(Utc::now()).await.is_empty());
        assert_eq!(table.by_actor(&key).await.len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_unknown_errors() {
        let table = InMemoryReminderTable::new();
        let key = ActorKey::new("cart", "user-1");
        let result = table.cancel(&key, "nope").await;
        assert!(matches!(result, Err(ReminderError::NotFound { .. })));
    }
}
