//! Reminder error types

use thiserror::Error;

/// Errors reported by a notification platform.
#[derive(Error, Debug)]
pub enum ReminderError {
    /// The user has not granted notification permission
    #[error("Notification permission denied")]
    PermissionDenied,

    /// One-shot triggers need a strictly positive delay
    #[error("Invalid reminder delay: {0} seconds")]
    InvalidDelay(u64),

    /// Notification channel could not be created
    #[error("Channel setup failed: {0}")]
    ChannelSetup(String),

    /// Any other platform failure
    #[error("Notification platform error: {0}")]
    Platform(String),
}

/// Result type for reminder operations
pub type ReminderResult<T> = Result<T, ReminderError>;
