//! Typed events emitted by the session controller.
//!
//! Every consumer (countdown display, tray reflector) subscribes to this
//! stream instead of sharing timer state directly.

use std::time::Duration;

use crate::types::{Phase, Tick};

/// Timer events for the display and external integrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// A phase began counting down
    PhaseStarted {
        /// Phase that started
        phase: Phase,
        /// Round the phase belongs to
        round: u32,
        /// Total rounds in the session
        total_rounds: u32,
        /// Configured phase length
        duration: Duration,
    },
    /// One second elapsed
    Tick(Tick),
    /// A phase ran to its end time
    PhaseCompleted {
        /// Phase that completed
        phase: Phase,
        /// Round the phase belongs to
        round: u32,
        /// Total rounds in the session
        total_rounds: u32,
    },
    /// Every round completed
    SessionCompleted {
        /// Rounds completed (equals the configured total)
        completed_rounds: u32,
    },
    /// The session was cancelled before finishing
    SessionCancelled {
        /// Rounds fully completed before cancellation
        completed_rounds: u32,
        /// Phase that was interrupted, if one was running
        phase: Option<Phase>,
    },
}
