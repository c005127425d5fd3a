//! Phase-change alerts: an audible beep plus a desktop popup.
//!
//! This module provides:
//!
//! - The `Notifier` seam used by the session controller
//! - `DesktopNotifier`, which hands alerts to a worker thread
//! - The `PopupSender` seam with a notify-rust implementation
//! - Message composition for phase starts
//! - Mocks for tests
//!
//! Delivery is best-effort. A failed popup or beep is logged and the timer
//! keeps running.
//!
//! # Example
//!
//! ```rust,no_run
//! use tomatick::notification::{DesktopNotifier, Notifier, NotifierOptions};
//!
//! let notifier = DesktopNotifier::spawn(NotifierOptions::default())?;
//! notifier.notify("Start work, tag: 'Coding', round:1/4, end time: 14:25:00")?;
//! # Ok::<(), tomatick::notification::NotificationError>(())
//! ```

mod content;
pub mod error;
mod worker;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub use self::content::{phase_message, wall_clock_end, APP_NAME, NOTIFICATION_TITLE};
pub use self::error::NotificationError;
pub use self::worker::{Alert, AlertWorker, SoundFactory};

use crate::sound::{try_create_player, SoundPlayer};

// ============================================================================
// Notifier
// ============================================================================

/// Fires one alert per phase start.
pub trait Notifier: Send + Sync {
    /// Delivers `message`.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert could not be handed off.
    fn notify(&self, message: &str) -> Result<(), NotificationError>;
}

/// Which alert effects are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifierOptions {
    /// Play the beep
    pub sound: bool,
    /// Show the desktop popup
    pub popup: bool,
}

impl Default for NotifierOptions {
    fn default() -> Self {
        Self {
            sound: true,
            popup: true,
        }
    }
}

/// Notifier backed by the system audio device and notification service.
#[derive(Debug)]
pub struct DesktopNotifier {
    worker: Mutex<AlertWorker>,
}

impl DesktopNotifier {
    /// Starts the alert worker with the real audio and popup backends.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread cannot be started.
    pub fn spawn(options: NotifierOptions) -> Result<Self, NotificationError> {
        let sound_factory: SoundFactory = if options.sound {
            Box::new(|| try_create_player().map(|p| Box::new(p) as Box<dyn SoundPlayer>))
        } else {
            Box::new(|| None)
        };
        let popup: Option<Box<dyn PopupSender>> = if options.popup {
            Some(Box::new(DesktopPopup))
        } else {
            None
        };
        Self::with_backends(sound_factory, popup)
    }

    /// Starts the alert worker with the given backends.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread cannot be started.
    pub fn with_backends(
        sound_factory: SoundFactory,
        popup: Option<Box<dyn PopupSender>>,
    ) -> Result<Self, NotificationError> {
        let worker = AlertWorker::spawn(sound_factory, popup)?;
        Ok(Self {
            worker: Mutex::new(worker),
        })
    }

    /// Stops the worker after queued alerts are delivered.
    pub fn shutdown(&self) {
        if let Ok(mut worker) = self.worker.lock() {
            worker.shutdown();
        }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str) -> Result<(), NotificationError> {
        let worker = self
            .worker
            .lock()
            .map_err(|_| NotificationError::WorkerStopped)?;
        worker.send(message)
    }
}

// ============================================================================
// PopupSender
// ============================================================================

/// Shows a desktop popup.
pub trait PopupSender: Send {
    /// Shows a popup with `title` and `body` and no subtitle.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::SendFailed` if the service rejects it.
    fn show(&self, title: &str, body: &str) -> Result<(), NotificationError>;
}

impl<T: PopupSender + Sync + ?Sized> PopupSender for Arc<T> {
    fn show(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        (**self).show(title, body)
    }
}

/// Popup through the platform notification service (notify-rust).
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopPopup;

impl PopupSender for DesktopPopup {
    fn show(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        notify_rust::Notification::new()
            .appname(APP_NAME)
            .summary(title)
            .body(body)
            .show()
            .map(|_| ())
            .map_err(|e| NotificationError::SendFailed(e.to_string()))
    }
}

// ============================================================================
// Mocks
// ============================================================================

/// Mock notifier recording every message.
#[derive(Debug, Default)]
pub struct MockNotifier {
    messages: Mutex<Vec<String>>,
    should_fail: AtomicBool,
}

impl MockNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// Number of notify calls, including failed ones.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

impl Notifier for MockNotifier {
    fn notify(&self, message: &str) -> Result<(), NotificationError> {
        self.messages.lock().unwrap().push(message.to_string());
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        Ok(())
    }
}

/// Mock popup recording every (title, body) pair.
#[derive(Debug, Default)]
pub struct MockPopup {
    shown: Mutex<Vec<(String, String)>>,
    attempts: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockPopup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn shown(&self) -> Vec<(String, String)> {
        self.shown.lock().unwrap().clone()
    }

    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl PopupSender for MockPopup {
    fn show(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        self.shown
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
        Ok(())
    }
}
