//! Plain-text output printed before and after the countdown screen.

use crate::timer::SessionOutcome;
use crate::types::ConfigError;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the end-of-session summary on stdout.
    pub fn show_summary(outcome: &SessionOutcome) {
        println!("{}", Self::summary_line(outcome));
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    /// Shows a configuration error with a usage hint.
    pub fn show_config_error(err: &ConfigError) {
        Self::show_error(&err.to_string());
        eprintln!("  check the value passed to {} (see --help)", err.flag());
    }

    /// One-line summary, e.g. "Session complete: 4/4 rounds".
    pub fn summary_line(outcome: &SessionOutcome) -> String {
        match outcome {
            SessionOutcome::Completed {
                completed_rounds,
                total_rounds,
            } => format!(
                "Session complete: {}/{} rounds",
                completed_rounds, total_rounds
            ),
            SessionOutcome::Cancelled {
                completed_rounds,
                total_rounds,
            } => format!(
                "Session cancelled after {}/{} rounds",
                completed_rounds, total_rounds
            ),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
