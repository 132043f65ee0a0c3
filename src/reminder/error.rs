use crate::util::ActorKey;

/// Errors raised by [`super::ReminderTable`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ReminderError {
    /// No reminder exists with the given actor key and name.
    #[error("no reminder named {name:?} for {key}")]
    NotFound {
        /// The actor the reminder was registered against.
        key: ActorKey,
        /// The reminder's name.
        name: String,
    },

    /// The backing table is unreachable.
    #[error("reminder table unavailable")]
    Unavailable,
}
