//! Background thread that turns alerts into a beep and a desktop popup.
//!
//! The timer hands alerts over a channel and never waits for delivery.
//! Failures on this thread are logged and the next alert is still served.
//! On shutdown the thread outlives the last beep so the tone is not cut off.

use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, warn};

use super::content::NOTIFICATION_TITLE;
use super::error::NotificationError;
use super::PopupSender;
use crate::sound::{Beep, SoundPlayer};

/// Builds the sound player on the worker thread.
pub type SoundFactory = Box<dyn FnOnce() -> Option<Box<dyn SoundPlayer>> + Send>;

/// Messages accepted by the alert worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// Beep and show `message`
    Show(String),
    /// Finish the queue and exit
    Shutdown,
}

/// Handle to a running alert worker thread.
#[derive(Debug)]
pub struct AlertWorker {
    tx: Sender<Alert>,
    handle: Option<JoinHandle<()>>,
}

impl AlertWorker {
    /// Spawns the worker thread.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::InitializationFailed` if the OS refuses to
    /// create the thread.
    pub fn spawn(
        sound_factory: SoundFactory,
        popup: Option<Box<dyn PopupSender>>,
    ) -> Result<Self, NotificationError> {
        let (tx, rx) = unbounded();
        let handle = thread::Builder::new()
            .name("alert-worker".to_string())
            .spawn(move || run_worker(rx, sound_factory, popup))
            .map_err(|e| NotificationError::InitializationFailed(e.to_string()))?;

        Ok(Self {
            tx,
            handle: Some(handle),
        })
    }

    /// Queues an alert.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::WorkerStopped` once the worker has exited.
    pub fn send(&self, message: &str) -> Result<(), NotificationError> {
        self.tx
            .send(Alert::Show(message.to_string()))
            .map_err(|_| NotificationError::WorkerStopped)
    }

    /// Stops the worker after it drains queued alerts.
    pub fn shutdown(&mut self) {
        let _ = self.tx.send(Alert::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("alert worker panicked");
            }
        }
    }
}

impl Drop for AlertWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(
    rx: Receiver<Alert>,
    sound_factory: SoundFactory,
    popup: Option<Box<dyn PopupSender>>,
) {
    let player = sound_factory();
    let beep = Beep::default();
    debug!(
        sound = player.is_some(),
        popup = popup.is_some(),
        "alert worker started"
    );

    let mut beep_ends: Option<Instant> = None;
    for alert in rx.iter() {
        let message = match alert {
            Alert::Show(message) => message,
            Alert::Shutdown => break,
        };

        if let Some(player) = &player {
            match player.play(&beep) {
                Ok(()) => beep_ends = Some(Instant::now() + beep.duration),
                Err(e) => warn!(error = %e, suggestion = e.suggestion(), "beep failed"),
            }
        }
        if let Some(popup) = &popup {
            if let Err(e) = popup.show(NOTIFICATION_TITLE, &message) {
                warn!(error = %e, suggestion = e.suggestion(), "desktop notification failed");
            }
        }
    }

    // The output stream lives in `player`; keep it until the tone is over.
    if let Some(ends) = beep_ends {
        let left = ends.saturating_duration_since(Instant::now());
        if !left.is_zero() {
            debug!(?left, "waiting for the last beep");
            thread::sleep(left);
        }
    }
    drop(player);

    debug!("alert worker stopped");
}
