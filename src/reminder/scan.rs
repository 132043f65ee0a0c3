// Layer 1: Standard library imports
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::Utc; // §3.2 MANDATORY
use tokio::time::interval;

// Layer 3: Internal module imports
use super::table::ReminderTable;
use crate::message::Envelope;
use crate::ring::HashRing;
use crate::util::SiloId;

/// Destination for reminder deliveries, implemented by whatever routes an [`Envelope`] into
/// the target actor's mailbox (typically the silo's router/transport pair).
///
/// Kept as a small trait, rather than a bare closure, so the scan loop can be generic over
/// `Send + Sync + 'static` implementors without boxing a callback per tick.
#[async_trait]
pub trait ReminderSink: Send + Sync {
    /// Deliver a reminder envelope. Errors are logged by the scan loop and left for the next
    /// tick to retry, since the reminder is only marked delivered once this returns `Ok`.
    async fn deliver(&self, envelope: Envelope) -> Result<(), crate::message::ErrorKind>;
}

/// Spawn the periodic reminder scan task.
///
/// Modeled directly on `supervisor::health_monitor::spawn_health_monitor`'s shape: a
/// `tokio::time::interval` loop selected against a `oneshot` shutdown signal. Each tick:
///
/// 1. Pulls every reminder due at or before now from `table`.
/// 2. Re-resolves ownership via `ring` — a reminder whose actor migrated to another silo
///    since it was scheduled is silently skipped here; the silo that now owns it will pick
///    it up on its own next scan, since `due_at` is shared state in `table`.
/// 3. Delivers owned reminders through `sink` and marks them delivered only on success, so a
///    failed delivery is retried on the next tick (at-least-once, never silently dropped).
pub fn spawn_reminder_scanner<T, S>(
    table: Arc<T>,
    ring: Arc<HashRing>,
    local_silo: SiloId,
    sink: Arc<S>,
    scan_interval: Duration,
) -> (
    tokio::task::JoinHandle<()>,
    tokio::sync::oneshot::Sender<()>,
)
where
    T: ReminderTable + 'static,
    S: ReminderSink + 'static,
{
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();

    let task_handle = tokio::spawn(async move {
        let mut ticker = interval(scan_interval);

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    break;
                }
                _ = ticker.tick() => {
                    let due = table.due_before(Utc::now()).await; // §3.2

                    for reminder in due {
                        let owner = ring.route(&reminder.key);
                        if owner.as_ref() != Some(&local_silo) {
                            continue;
                        }

                        let envelope = Envelope::new(
                            reminder.key.actor_type.clone(),
                            reminder.key.actor_id.clone(),
                            reminder.name.clone(),
                            reminder.payload.clone(),
                        )
                        .with_reminder_flag();

                        match sink.deliver(envelope).await {
                            Ok(()) => {
                                if let Err(e) =
                                    table.mark_delivered(&reminder.key, &reminder.name).await
                                {
                                    eprintln!("reminder mark_delivered failed: {e}");
                                }
                            }
                            Err(e) => {
                                eprintln!(
                                    "reminder delivery failed for {}/{}: {e}",
                                    reminder.key, reminder.name
                                );
                            }
                        }
                    }
                }
            }
        }
    });

    (task_handle, shutdown_tx)
}
