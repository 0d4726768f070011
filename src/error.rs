//! Error types for the reminder scheduler.

/// Top-level error type for the reminder notification core.
#[derive(Debug, thiserror::Error)]
pub enum ReminderError {
    /// Reminder store unreachable or returned an error.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Platform notification delivery error.
    #[error("dispatch error: {0}")]
    Dispatch(String),

    /// Configuration error (parse failure, invalid value).
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ReminderError>;
