//! Flag definitions for the tomatick CLI.
//!
//! Uses clap derive macro for argument parsing. Duration flags are kept as
//! text here and parsed by `Cli::to_config`, so the error names the flag.

use std::path::PathBuf;

use clap::Parser;

use crate::notification::NotifierOptions;
use crate::types::{parse_duration_flag, validate_tag, ConfigError, SessionConfig, DEFAULT_TAG};

// ============================================================================
// CLI Structure
// ============================================================================

/// Terminal Pomodoro timer
#[derive(Parser, Debug, Clone)]
#[command(
    name = "tomatick",
    version,
    about = "Terminal Pomodoro timer",
    long_about = "Runs alternating work and break phases in the terminal.\n\
                  Each phase start beeps and shows a desktop notification. \
                  Press q to stop."
)]
pub struct Cli {
    /// Work phase length (e.g. 25m, 90s, 1h30m)
    #[arg(short, long, default_value = "25m", value_name = "DURATION")]
    pub work: String,

    /// Break phase length (e.g. 5m, 30s)
    #[arg(
        short = 'b',
        long = "break",
        default_value = "5m",
        value_name = "DURATION"
    )]
    pub break_time: String,

    /// Number of work/break rounds
    #[arg(
        short,
        long,
        default_value_t = 5,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub rounds: u32,

    /// Tag shown in the title and in notifications
    #[arg(short, long, default_value = DEFAULT_TAG, value_parser = parse_tag)]
    pub tag: String,

    /// Do not beep on phase changes
    #[arg(long)]
    pub no_sound: bool,

    /// Do not show desktop notifications
    #[arg(long)]
    pub no_popup: bool,

    /// Mirror the countdown in the system tray
    #[arg(long)]
    pub tray: bool,

    /// Write logs to this file instead of the cache directory
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log at info level
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

impl Cli {
    /// Builds a validated session configuration from the flags.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the offending flag.
    pub fn to_config(&self) -> Result<SessionConfig, ConfigError> {
        let config = SessionConfig::default()
            .with_work_duration(parse_duration_flag("--work", &self.work)?)
            .with_break_duration(parse_duration_flag("--break", &self.break_time)?)
            .with_rounds(self.rounds)
            .with_tag(self.tag.clone());
        config.validate()?;
        Ok(config)
    }

    /// Alert effects selected by `--no-sound` / `--no-popup`.
    pub fn notifier_options(&self) -> NotifierOptions {
        NotifierOptions {
            sound: !self.no_sound,
            popup: !self.no_popup,
        }
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates the tag.
///
/// - Must not be empty
/// - Must not exceed 100 characters
fn parse_tag(s: &str) -> Result<String, ConfigError> {
    validate_tag(s)?;
    Ok(s.to_string())
}

// ============================================================================
// Tests
// ============================================================================
