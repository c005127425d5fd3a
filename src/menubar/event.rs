//! Tray updates and the timer-event subscriber that produces them.
//!
//! `TrayPublisher` runs inside the event router (a tokio task) and sends
//! `TrayUpdate`s over a crossbeam channel to the `TrayReflector`, which
//! lives on the main thread.

use crossbeam_channel::Sender;

use super::icon::{IconManager, TrayIconKind, IDLE_TITLE};
use super::TrayError;
use crate::app::EventSink;
use crate::timer::TimerEvent;
use crate::types::signed_seconds;

// ============================================================================
// TrayUpdate
// ============================================================================

/// Updates sent to the tray from other parts of the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayUpdate {
    /// Replace the title text
    SetTitle(String),
    /// Switch the icon
    SetIcon(TrayIconKind),
}

// ============================================================================
// TrayPublisher
// ============================================================================

/// Converts timer events into tray updates.
#[derive(Debug)]
pub struct TrayPublisher {
    tx: Sender<TrayUpdate>,
    icons: IconManager,
}

impl TrayPublisher {
    pub fn new(tx: Sender<TrayUpdate>) -> Self {
        Self {
            tx,
            icons: IconManager::new(),
        }
    }

    fn send(&self, update: TrayUpdate) -> Result<(), TrayError> {
        self.tx.send(update).map_err(|_| TrayError::Disconnected)
    }

    fn updates_for(&self, event: &TimerEvent) -> Vec<TrayUpdate> {
        match event {
            TimerEvent::PhaseStarted {
                phase, duration, ..
            } => vec![
                TrayUpdate::SetIcon(TrayIconKind::for_phase(*phase)),
                TrayUpdate::SetTitle(
                    self.icons
                        .generate_title(*phase, signed_seconds(*duration)),
                ),
            ],
            TimerEvent::Tick(tick) => vec![TrayUpdate::SetTitle(
                self.icons.generate_title(tick.phase, tick.remaining_seconds),
            )],
            TimerEvent::PhaseCompleted { .. } => Vec::new(),
            TimerEvent::SessionCompleted { .. } | TimerEvent::SessionCancelled { .. } => vec![
                TrayUpdate::SetIcon(TrayIconKind::Idle),
                TrayUpdate::SetTitle(IDLE_TITLE.to_string()),
            ],
        }
    }
}

impl EventSink for TrayPublisher {
    fn name(&self) -> &'static str {
        "tray"
    }

    fn handle(&mut self, event: &TimerEvent) -> anyhow::Result<()> {
        for update in self.updates_for(event) {
            self.send(update)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Phase, Tick};
    use crossbeam_channel::unbounded;
    use std::time::Duration;

    fn drain(rx: &crossbeam_channel::Receiver<TrayUpdate>) -> Vec<TrayUpdate> {
        rx.try_iter().collect()
    }

    #[test]
    fn test_phase_started_switches_icon_and_title() {
        let (tx, rx) = unbounded();
        let mut publisher = TrayPublisher::new(tx);

        publisher
            .handle(&TimerEvent::PhaseStarted {
                phase: Phase::Work,
                round: 1,
                total_rounds: 2,
                duration: Duration::from_secs(25 * 60),
            })
            .unwrap();

        assert_eq!(
            drain(&rx),
            vec![
                TrayUpdate::SetIcon(TrayIconKind::Working),
                TrayUpdate::SetTitle("🍅 25m0s".to_string()),
            ]
        );
    }

    #[test]
    fn test_tick_overwrites_title() {
        let (tx, rx) = unbounded();
        let mut publisher = TrayPublisher::new(tx);

        publisher
            .handle(&TimerEvent::Tick(Tick {
                phase: Phase::Break,
                remaining_seconds: 299,
                round: 1,
                total_rounds: 1,
            }))
            .unwrap();

        assert_eq!(drain(&rx), vec![TrayUpdate::SetTitle("☕ 4m59s".to_string())]);
    }

    #[test]
    fn test_phase_completed_is_silent() {
        let (tx, rx) = unbounded();
        let mut publisher = TrayPublisher::new(tx);
        publisher
            .handle(&TimerEvent::PhaseCompleted {
                phase: Phase::Work,
                round: 1,
                total_rounds: 1,
            })
            .unwrap();
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_session_end_resets_to_idle() {
        let (tx, rx) = unbounded();
        let mut publisher = TrayPublisher::new(tx);
        publisher
            .handle(&TimerEvent::SessionCancelled {
                completed_rounds: 0,
                phase: Some(Phase::Work),
            })
            .unwrap();
        assert_eq!(
            drain(&rx),
            vec![
                TrayUpdate::SetIcon(TrayIconKind::Idle),
                TrayUpdate::SetTitle(IDLE_TITLE.to_string()),
            ]
        );
    }

    #[test]
    fn test_disconnected_reflector_is_an_error() {
        let (tx, rx) = unbounded();
        drop(rx);
        let mut publisher = TrayPublisher::new(tx);
        let result = publisher.handle(&TimerEvent::SessionCompleted { completed_rounds: 1 });
        assert!(result.is_err());
    }
}
