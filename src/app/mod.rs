//! Application wiring.
//!
//! `run` owns the whole lifetime of one session:
//!
//! 1. builds a multi-threaded tokio runtime
//! 2. starts the alert worker and, with `--tray`, the tray reflector
//! 3. spawns the session controller, the event router and a Ctrl-C listener
//! 4. runs the countdown screen on the main thread until the session ends
//! 5. joins the tasks and returns the outcome
//!
//! The tray and the terminal both stay on the main thread; only the timer
//! and the event fan-out run on the runtime.

pub mod router;

pub use router::{EventRouter, EventSink};

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::menubar::{TrayPublisher, TrayReflector};
use crate::notification::{DesktopNotifier, Notifier, NotifierOptions};
use crate::timer::{CancellationSignal, SessionController, SessionOutcome};
use crate::types::SessionConfig;
use crate::ui::{CountdownView, RenderDriver, SharedCountdown};

/// Runtime switches that are not part of the session itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppOptions {
    /// Which alert effects are enabled
    pub notifier: NotifierOptions,
    /// Mirror the countdown in the system tray
    pub tray: bool,
}

/// Runs one session with the countdown screen and returns how it ended.
///
/// # Errors
///
/// Returns an error if a setup step fails: the runtime, the alert worker,
/// the tray icon or the terminal. Failures after setup (a popup, a beep, a
/// frame) are logged and do not end the session.
pub fn run(config: SessionConfig, options: AppOptions) -> Result<SessionOutcome> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("tomatick-rt")
        .enable_all()
        .build()
        .context("Failed to build async runtime")?;

    let notifier =
        Arc::new(DesktopNotifier::spawn(options.notifier).context("Failed to start alert worker")?);

    let cancel = CancellationSignal::new();
    let view = SharedCountdown::new(CountdownView::new(config.tag.clone(), config.rounds));
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut router = EventRouter::new(event_rx).with_sink(view.sink());

    let mut tray = if options.tray {
        let (tray_tx, tray_rx) = crossbeam_channel::unbounded();
        let mut reflector = TrayReflector::new(config.tag.clone(), tray_rx);
        reflector
            .initialize()
            .context("Failed to create tray icon")?;
        router = router.with_sink(TrayPublisher::new(tray_tx));
        Some(reflector)
    } else {
        None
    };

    let mut controller = SessionController::new(
        &config,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
        event_tx,
        cancel.clone(),
    );

    info!(?options, "starting session");
    let session_task = runtime.spawn(async move { controller.run().await });
    let router_task = runtime.spawn(router.run());
    runtime.spawn(listen_for_ctrl_c(cancel.clone()));

    let driver = RenderDriver::new(view, cancel.clone());
    let ui_result = driver.run(
        || {
            if let Some(reflector) = tray.as_mut() {
                reflector.process_pending_updates();
            }
        },
        || session_task.is_finished(),
    );
    if ui_result.is_err() {
        cancel.cancel();
    }
    let exit = ui_result.context("Failed to run countdown display")?;
    debug!(?exit, "countdown screen closed");

    // A closed screen always ends the session.
    cancel.cancel();
    let outcome = runtime
        .block_on(session_task)
        .context("Session task failed")??;
    let routed = runtime
        .block_on(router_task)
        .context("Event router task failed")?;
    debug!(routed, "event router joined");

    if let Some(mut reflector) = tray {
        reflector.process_pending_updates();
        reflector.shutdown();
    }
    notifier.shutdown();

    info!(?outcome, "session ended");
    Ok(outcome)
}

/// Fires `cancel` on SIGINT. Exits quietly once `cancel` fires elsewhere.
async fn listen_for_ctrl_c(cancel: CancellationSignal) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => {
                    info!("interrupt received, stopping session");
                    cancel.cancel();
                }
                Err(e) => tracing::warn!(error = %e, "failed to listen for Ctrl-C"),
            }
        }
        _ = cancel.cancelled() => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_options() {
        let options = AppOptions::default();
        assert!(!options.tray);
    }

    #[tokio::test]
    async fn test_ctrl_c_listener_exits_on_cancel() {
        let cancel = CancellationSignal::new();
        let listener = tokio::spawn(listen_for_ctrl_c(cancel.clone()));

        tokio::time::sleep(Duration::from_millis(10)).await;
        cancel.cancel();

        listener.await.unwrap();
        assert!(cancel.is_cancelled());
    }
}
