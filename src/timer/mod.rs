//! Timer engine for the Pomodoro Timer.
//!
//! This module provides the core timer functionality:
//! - Phase countdown with tokio::time::interval
//! - Work -> Break sequencing across rounds
//! - A typed event stream for the display and tray
//! - Cooperative cancellation at every suspend point

pub mod cancel;
pub mod event;
pub mod phase;
pub mod session;

pub use cancel::CancellationSignal;
pub use event::TimerEvent;
pub use phase::{PhaseOutcome, PhaseTimer, TICK_INTERVAL};
pub use session::{SessionController, SessionOutcome};
