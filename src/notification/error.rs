//! Notification system error types.
//!
//! None of these are fatal to a running session: the controller logs them
//! and the countdown continues.

use thiserror::Error;

/// Errors that can occur in the notification system.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The desktop notification service rejected or failed the popup.
    #[error("failed to show desktop notification: {0}")]
    SendFailed(String),

    /// The alert worker thread is no longer accepting alerts.
    #[error("alert worker has stopped")]
    WorkerStopped,

    /// Failed to start the alert worker.
    #[error("failed to start alert worker: {0}")]
    InitializationFailed(String),
}

impl NotificationError {
    /// Returns true if the notifier can no longer deliver anything.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::WorkerStopped | Self::InitializationFailed(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::SendFailed(_) => "check that a notification daemon is running",
            Self::WorkerStopped => "restart the timer to restore notifications",
            Self::InitializationFailed(_) => "run with --no-popup --no-sound to skip alerts",
        }
    }
}
