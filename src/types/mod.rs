//! Core data types for the Pomodoro Timer.
//!
//! This module defines the data structures used for:
//! - Phases and the per-second tick sample
//! - Session bookkeeping (current round, total rounds)
//! - Session configuration with validation
//! - Remaining-time formatting

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Tag used when none is given on the command line.
pub const DEFAULT_TAG: &str = "Ordinary task";

/// Maximum tag length in characters.
pub const MAX_TAG_LEN: usize = 100;

/// Longest accepted phase duration (24 hours).
pub const MAX_PHASE_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

// ============================================================================
// Phase
// ============================================================================

/// One contiguous interval of either focused work or a break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Focused work interval
    Work,
    /// Rest interval
    Break,
}

impl Phase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Break => "break",
        }
    }

    /// Returns the leading words of the notification fired when the phase starts.
    pub fn start_message(&self) -> &'static str {
        match self {
            Phase::Work => "Start work",
            Phase::Break => "Start rest",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tick
// ============================================================================

/// One per-second sample of the remaining time within an active phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Phase being counted down
    pub phase: Phase,
    /// Remaining whole seconds (negative once the end time has passed)
    pub remaining_seconds: i64,
    /// Round this tick belongs to (1-based)
    pub round: u32,
    /// Total rounds in the session
    pub total_rounds: u32,
}

impl Tick {
    /// Returns the remaining time as a signed duration string (e.g. "24m59s").
    pub fn remaining_display(&self) -> String {
        format_remaining(self.remaining_seconds)
    }
}

/// Rounds a duration to the nearest whole second, halves rounding up.
pub fn round_to_seconds(duration: Duration) -> u64 {
    let millis = duration.as_millis() + 500;
    u64::try_from(millis / 1000).unwrap_or(u64::MAX)
}

/// [`round_to_seconds`] as a signed count, saturating at `i64::MAX`.
pub fn signed_seconds(duration: Duration) -> i64 {
    i64::try_from(round_to_seconds(duration)).unwrap_or(i64::MAX)
}

/// Formats signed whole seconds as a compact duration string.
///
/// Units above the leading one are always printed, so 25 minutes renders
/// as "25m0s" and 3723 seconds as "1h2m3s". Zero is "0s".
pub fn format_remaining(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let total = seconds.unsigned_abs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}{}h{}m{}s", sign, hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}{}m{}s", sign, minutes, secs)
    } else {
        format!("{}{}s", sign, secs)
    }
}

// ============================================================================
// ConfigError
// ============================================================================

/// Errors raised while building a session configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A duration flag could not be parsed.
    #[error("invalid value '{value}' for '{flag}': {reason}")]
    InvalidDuration {
        /// Flag name, e.g. "--work"
        flag: &'static str,
        /// The rejected input
        value: String,
        /// Parser message
        reason: String,
    },

    /// A duration flag parsed to zero.
    #[error("'{flag}' must be longer than zero")]
    ZeroDuration {
        /// Flag name, e.g. "--break"
        flag: &'static str,
    },

    /// A duration flag exceeds [`MAX_PHASE_DURATION`].
    #[error("'{flag}' must be at most 24h")]
    DurationTooLong {
        /// Flag name, e.g. "--work"
        flag: &'static str,
    },

    /// Round count below one.
    #[error("'--rounds' must be at least 1")]
    NoRounds,

    /// Empty tag.
    #[error("'--tag' must not be empty")]
    EmptyTag,

    /// Tag longer than [`MAX_TAG_LEN`].
    #[error("'--tag' must be at most {MAX_TAG_LEN} characters")]
    TagTooLong,
}

impl ConfigError {
    /// Returns the flag responsible for this error.
    pub fn flag(&self) -> &'static str {
        match self {
            Self::InvalidDuration { flag, .. }
            | Self::ZeroDuration { flag }
            | Self::DurationTooLong { flag } => flag,
            Self::NoRounds => "--rounds",
            Self::EmptyTag | Self::TagTooLong => "--tag",
        }
    }
}

/// Parses a duration flag value such as "25m" or "90s".
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDuration`] naming `flag` when the value is
/// malformed, [`ConfigError::ZeroDuration`] when it parses to zero and
/// [`ConfigError::DurationTooLong`] above [`MAX_PHASE_DURATION`].
pub fn parse_duration_flag(flag: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let duration =
        humantime::parse_duration(value.trim()).map_err(|e| ConfigError::InvalidDuration {
            flag,
            value: value.to_string(),
            reason: e.to_string(),
        })?;
    check_duration_bounds(flag, duration)?;
    Ok(duration)
}

fn check_duration_bounds(flag: &'static str, duration: Duration) -> Result<(), ConfigError> {
    if duration.is_zero() {
        return Err(ConfigError::ZeroDuration { flag });
    }
    if duration > MAX_PHASE_DURATION {
        return Err(ConfigError::DurationTooLong { flag });
    }
    Ok(())
}

/// Validates a session tag.
///
/// - Must not be empty
/// - Must not exceed [`MAX_TAG_LEN`] characters
pub fn validate_tag(tag: &str) -> Result<(), ConfigError> {
    if tag.trim().is_empty() {
        return Err(ConfigError::EmptyTag);
    }
    if tag.chars().count() > MAX_TAG_LEN {
        return Err(ConfigError::TagTooLong);
    }
    Ok(())
}

// ============================================================================
// SessionConfig
// ============================================================================

/// Validated configuration for one Pomodoro session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Work phase length
    pub work_duration: Duration,
    /// Break phase length
    pub break_duration: Duration,
    /// Number of work/break rounds
    pub rounds: u32,
    /// Free-text label shown in the UI and notifications
    pub tag: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            work_duration: Duration::from_secs(25 * 60),
            break_duration: Duration::from_secs(5 * 60),
            rounds: 5,
            tag: DEFAULT_TAG.to_string(),
        }
    }
}

impl SessionConfig {
    /// Returns the configuration with the specified work duration.
    pub fn with_work_duration(mut self, duration: Duration) -> Self {
        self.work_duration = duration;
        self
    }

    /// Returns the configuration with the specified break duration.
    pub fn with_break_duration(mut self, duration: Duration) -> Self {
        self.break_duration = duration;
        self
    }

    /// Returns the configuration with the specified round count.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Returns the configuration with the specified tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_duration_bounds("--work", self.work_duration)?;
        check_duration_bounds("--break", self.break_duration)?;
        if self.rounds < 1 {
            return Err(ConfigError::NoRounds);
        }
        validate_tag(&self.tag)
    }
}

// ============================================================================
// Session
// ============================================================================

/// Round bookkeeping for a running session.
///
/// `current_round` stays within `1..=total_rounds + 1`; reaching
/// `total_rounds + 1` means the session is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Configured number of rounds
    pub total_rounds: u32,
    /// Round currently running (1-based)
    current_round: u32,
    /// Session label
    pub tag: String,
    /// Work phase length
    pub work_duration: Duration,
    /// Break phase length
    pub break_duration: Duration,
}

impl Session {
    /// Creates a session positioned at round 1.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            total_rounds: config.rounds,
            current_round: 1,
            tag: config.tag.clone(),
            work_duration: config.work_duration,
            break_duration: config.break_duration,
        }
    }

    /// Returns the round currently running.
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    /// Returns the number of fully completed rounds.
    pub fn completed_rounds(&self) -> u32 {
        self.current_round - 1
    }

    /// Returns true once every round has completed.
    pub fn is_complete(&self) -> bool {
        self.current_round > self.total_rounds
    }

    /// Marks the current round as completed.
    ///
    /// Does nothing once the session is complete.
    pub fn advance_round(&mut self) {
        if !self.is_complete() {
            self.current_round += 1;
        }
    }

    /// Returns the configured length of `phase`.
    pub fn duration_for(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Work => self.work_duration,
            Phase::Break => self.break_duration,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
