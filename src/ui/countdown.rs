//! Display sink: the state the render loop draws from.
//!
//! `DisplaySink` is registered with the event router and folds timer events
//! into a `CountdownView`. The render loop reads a snapshot of the same view
//! once per frame.

use std::sync::{Arc, RwLock};

use super::DisplayError;
use crate::app::EventSink;
use crate::timer::TimerEvent;
use crate::types::{format_remaining, signed_seconds, Phase};

/// How a session ended, as seen by the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Completed,
    Cancelled,
}

/// Everything the countdown screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownView {
    tag: String,
    phase: Option<Phase>,
    remaining_seconds: i64,
    round: u32,
    total_rounds: u32,
    completed_rounds: u32,
    ended: Option<SessionEnd>,
}

impl CountdownView {
    /// Creates an empty view for a session of `total_rounds`.
    pub fn new(tag: impl Into<String>, total_rounds: u32) -> Self {
        Self {
            tag: tag.into(),
            phase: None,
            remaining_seconds: 0,
            round: 1,
            total_rounds,
            completed_rounds: 0,
            ended: None,
        }
    }

    /// Folds one event into the view.
    pub fn apply(&mut self, event: &TimerEvent) {
        match event {
            TimerEvent::PhaseStarted {
                phase,
                round,
                total_rounds,
                duration,
            } => {
                self.phase = Some(*phase);
                self.round = *round;
                self.total_rounds = *total_rounds;
                self.remaining_seconds = signed_seconds(*duration);
            }
            TimerEvent::Tick(tick) => {
                self.phase = Some(tick.phase);
                self.round = tick.round;
                self.total_rounds = tick.total_rounds;
                self.remaining_seconds = tick.remaining_seconds;
            }
            TimerEvent::PhaseCompleted { .. } => {
                self.remaining_seconds = 0;
            }
            TimerEvent::SessionCompleted { completed_rounds } => {
                self.completed_rounds = *completed_rounds;
                self.ended = Some(SessionEnd::Completed);
            }
            TimerEvent::SessionCancelled {
                completed_rounds, ..
            } => {
                self.completed_rounds = *completed_rounds;
                self.ended = Some(SessionEnd::Cancelled);
            }
        }
    }

    /// Session tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Phase on screen, if one has started.
    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Remaining whole seconds of the current phase.
    pub fn remaining_seconds(&self) -> i64 {
        self.remaining_seconds
    }

    /// How the session ended, if it has.
    pub fn ended(&self) -> Option<SessionEnd> {
        self.ended
    }

    /// Rounds finished when the session ended.
    pub fn completed_rounds(&self) -> u32 {
        self.completed_rounds
    }

    /// Remaining time in the countdown format ("24m59s").
    pub fn remaining_display(&self) -> String {
        format_remaining(self.remaining_seconds)
    }

    /// Border title.
    pub fn title(&self) -> String {
        format!("  Work on: '{}', to stop press Q  ", self.tag)
    }

    /// Line under the countdown, e.g. "round 2/4 · break".
    pub fn status_line(&self) -> String {
        let state = match (self.ended, self.phase) {
            (Some(SessionEnd::Completed), _) => "done",
            (Some(SessionEnd::Cancelled), _) => "stopped",
            (None, Some(phase)) => phase.as_str(),
            (None, None) => "starting",
        };
        format!("round {}/{} · {}", self.round, self.total_rounds, state)
    }
}

/// Countdown view shared between the router task and the render loop.
#[derive(Debug, Clone)]
pub struct SharedCountdown(Arc<RwLock<CountdownView>>);

impl SharedCountdown {
    /// Wraps `view` for sharing.
    pub fn new(view: CountdownView) -> Self {
        Self(Arc::new(RwLock::new(view)))
    }

    /// Copy of the current view.
    ///
    /// # Errors
    ///
    /// Returns `DisplayError::StatePoisoned` if a writer panicked.
    pub fn snapshot(&self) -> Result<CountdownView, DisplayError> {
        self.0
            .read()
            .map(|view| view.clone())
            .map_err(|_| DisplayError::StatePoisoned)
    }

    /// Event sink writing into this view.
    pub fn sink(&self) -> DisplaySink {
        DisplaySink { view: self.clone() }
    }
}

/// Event sink that keeps a `SharedCountdown` current.
#[derive(Debug)]
pub struct DisplaySink {
    view: SharedCountdown,
}

impl EventSink for DisplaySink {
    fn name(&self) -> &'static str {
        "display"
    }

    fn handle(&mut self, event: &TimerEvent) -> anyhow::Result<()> {
        let mut view = self
            .view
            .0
            .write()
            .map_err(|_| DisplayError::StatePoisoned)?;
        view.apply(event);
        Ok(())
    }
}
