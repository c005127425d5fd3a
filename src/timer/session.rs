//! Session controller: sequences Work -> Break pairs for the configured
//! number of rounds.
//!
//! Phases run strictly one after another, so exactly one phase timer
//! produces ticks at any moment. Cancellation abandons the in-flight phase
//! and every later round; rounds already completed stay counted.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::cancel::CancellationSignal;
use super::event::TimerEvent;
use super::phase::{PhaseOutcome, PhaseTimer};
use crate::notification::{phase_message, wall_clock_end, Notifier};
use crate::types::{Phase, Session, SessionConfig, Tick};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every round ran to completion
    Completed {
        /// Rounds completed
        completed_rounds: u32,
        /// Rounds configured
        total_rounds: u32,
    },
    /// The cancellation signal fired first
    Cancelled {
        /// Rounds completed before cancellation
        completed_rounds: u32,
        /// Rounds configured
        total_rounds: u32,
    },
}

impl SessionOutcome {
    /// Returns the number of fully completed rounds.
    pub fn completed_rounds(&self) -> u32 {
        match self {
            SessionOutcome::Completed {
                completed_rounds, ..
            }
            | SessionOutcome::Cancelled {
                completed_rounds, ..
            } => *completed_rounds,
        }
    }

    /// Returns the configured number of rounds.
    pub fn total_rounds(&self) -> u32 {
        match self {
            SessionOutcome::Completed { total_rounds, .. }
            | SessionOutcome::Cancelled { total_rounds, .. } => *total_rounds,
        }
    }
}

/// Drives a whole session, one phase at a time.
pub struct SessionController {
    session: Session,
    phase_timer: PhaseTimer,
    notifier: Arc<dyn Notifier>,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
    cancel: CancellationSignal,
}

impl SessionController {
    /// Creates a controller positioned at round 1.
    pub fn new(
        config: &SessionConfig,
        notifier: Arc<dyn Notifier>,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
        cancel: CancellationSignal,
    ) -> Self {
        Self {
            session: Session::new(config),
            phase_timer: PhaseTimer::default(),
            notifier,
            event_tx,
            cancel,
        }
    }

    /// Replaces the phase timer (e.g. a different tick cadence).
    pub fn with_phase_timer(mut self, phase_timer: PhaseTimer) -> Self {
        self.phase_timer = phase_timer;
        self
    }

    /// Returns the round bookkeeping.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs every round until completion or cancellation.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel has been closed by its consumer.
    pub async fn run(&mut self) -> Result<SessionOutcome> {
        info!(
            rounds = self.session.total_rounds,
            tag = %self.session.tag,
            "session started"
        );

        while !self.session.is_complete() {
            for phase in [Phase::Work, Phase::Break] {
                if self.cancel.is_cancelled() {
                    return self.finish_cancelled(None);
                }
                let outcome = self.run_phase(phase).await?;
                if outcome.is_cancelled() {
                    return self.finish_cancelled(Some(phase));
                }
            }
            self.session.advance_round();
        }

        let completed_rounds = self.session.completed_rounds();
        info!(completed_rounds, "session completed");
        self.emit(TimerEvent::SessionCompleted { completed_rounds })
            .context("Failed to send session completed event")?;

        Ok(SessionOutcome::Completed {
            completed_rounds,
            total_rounds: self.session.total_rounds,
        })
    }

    /// Runs a single phase of the current round.
    async fn run_phase(&mut self, phase: Phase) -> Result<PhaseOutcome> {
        let round = self.session.current_round();
        let total_rounds = self.session.total_rounds;
        let duration = self.session.duration_for(phase);

        info!(%phase, round, total_rounds, ?duration, "phase started");
        self.emit(TimerEvent::PhaseStarted {
            phase,
            round,
            total_rounds,
            duration,
        })
        .context("Failed to send phase started event")?;

        let message = phase_message(
            phase,
            &self.session.tag,
            round,
            total_rounds,
            &wall_clock_end(duration),
        );
        if let Err(e) = self.notifier.notify(&message) {
            warn!(error = %e, "notification failed, timer continues");
        }

        let event_tx = self.event_tx.clone();
        let outcome = self
            .phase_timer
            .run(duration, &self.cancel, |remaining_seconds| {
                let tick = Tick {
                    phase,
                    remaining_seconds,
                    round,
                    total_rounds,
                };
                debug!(remaining_seconds, %phase, "tick");
                // A closed channel surfaces at the next phase boundary.
                let _ = event_tx.send(TimerEvent::Tick(tick));
            })
            .await;

        if let PhaseOutcome::Completed { ticks } = outcome {
            info!(%phase, round, ticks, "phase completed");
            self.emit(TimerEvent::PhaseCompleted {
                phase,
                round,
                total_rounds,
            })
            .context("Failed to send phase completed event")?;
        }

        Ok(outcome)
    }

    fn finish_cancelled(&self, phase: Option<Phase>) -> Result<SessionOutcome> {
        let completed_rounds = self.session.completed_rounds();
        info!(completed_rounds, ?phase, "session cancelled");
        self.emit(TimerEvent::SessionCancelled {
            completed_rounds,
            phase,
        })
        .context("Failed to send session cancelled event")?;

        Ok(SessionOutcome::Cancelled {
            completed_rounds,
            total_rounds: self.session.total_rounds,
        })
    }

    fn emit(&self, event: TimerEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .map_err(|e| anyhow::anyhow!("event channel closed: {:?}", e.0))
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("session", &self.session)
            .field("phase_timer", &self.phase_timer)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
